use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use async_trait::async_trait;
use serde_json::{Value, json};

use folio_core::domain::ContactMessage;
use folio_core::ports::{MailError, Mailer};
use folio_infra::{
    InMemoryContentStore, InMemoryObjectStorage, ObjectPaths, SidecarConfig, SidecarObjectStorage,
};

use super::configure_routes;
use crate::config::AppConfig;
use crate::state::AppState;

const PRIVATE_DIR: &str = "/folio-bucket/.private";
const ADMIN_PASSWORD: &str = "letmein";

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_contact(&self, _message: &ContactMessage) -> Result<(), MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

fn state_with(store: InMemoryContentStore, vars: &[(&str, &str)]) -> (AppState, Arc<InMemoryObjectStorage>) {
    let mut vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.entry("ADMIN_PASSWORD".to_string())
        .or_insert_with(|| ADMIN_PASSWORD.to_string());
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned());

    let mut state = AppState::with_store(Arc::new(store), &config).unwrap();
    let objects = Arc::new(InMemoryObjectStorage::new(ObjectPaths::new(PRIVATE_DIR).unwrap()));
    state.objects = objects.clone();
    state.mailer = Arc::new(FailingMailer);

    (state, objects)
}

fn seeded() -> AppState {
    state_with(InMemoryContentStore::seeded(), &[]).0
}

macro_rules! app {
    ($state:expr) => {{
        let state = $state.clone();
        test::init_service(App::new().configure(|cfg| configure_routes(cfg, &state))).await
    }};
}

fn draft() -> Value {
    json!({
        "title": "Draft notes",
        "content": "Nothing to see yet",
        "tags": ["JavaScript"],
        "published": false
    })
}

#[actix_web::test]
async fn test_health() {
    let app = app!(seeded());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_create_then_fetch_counts_views() {
    let app = app!(state_with(InMemoryContentStore::new(), &[]).0);

    let req = test::TestRequest::post()
        .uri("/api/blog-posts")
        .set_json(json!({
            "title": "Hello, World! 2024",
            "content": "three short words",
            "published": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["slug"], "hello-world-2024");
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(created["metadata"]["readTime"], 1);
    assert_eq!(created["metadata"]["views"], 0);
    assert_eq!(created["metadata"]["author"], "Alex Shyaka");

    let by_slug: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts/hello-world-2024")
            .to_request(),
    )
    .await;
    assert_eq!(by_slug["metadata"]["views"], 1);

    let id = created["id"].as_str().unwrap();
    let by_id: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/blog-posts/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(by_id["metadata"]["views"], 2);
}

#[actix_web::test]
async fn test_unknown_post_is_404() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/blog-posts/no-such-post").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Blog post not found");
}

#[actix_web::test]
async fn test_create_rejects_invalid_bodies() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(json!({ "title": "", "content": "body" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(
        body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["field"] == "title")
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(json!({ "title": "No content" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_missing_required_fields_report_field_errors() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(json!({ "content": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_fields(&body), vec!["title"]);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts/1/comments")
            .set_json(json!({ "content": "Nice" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let fields = error_fields(&body);
    assert!(fields.contains(&"author".to_string()));
    assert!(fields.contains(&"email".to_string()));
}

#[actix_web::test]
async fn test_list_filters_and_pages() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(draft())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let published: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?published=true")
            .to_request(),
    )
    .await;
    assert_eq!(published.len(), 4);
    assert!(published.iter().all(|p| p["published"] == true));

    let drafts: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?published=false")
            .to_request(),
    )
    .await;
    assert_eq!(drafts.len(), 1);

    let page: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?limit=2&offset=1")
            .to_request(),
    )
    .await;
    let ids: Vec<&str> = page.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let lenient: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?limit=abc&published=maybe")
            .to_request(),
    )
    .await;
    assert_eq!(lenient.len(), 5);
}

#[actix_web::test]
async fn test_search_respects_published_param() {
    let app = app!(seeded());

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(draft())
            .to_request(),
    )
    .await;

    let all: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?search=java")
            .to_request(),
    )
    .await;
    assert!(all.iter().any(|p| p["title"] == "Draft notes"));
    assert!(all.iter().any(|p| p["id"] == "2"));

    let live: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts?search=java&published=true")
            .to_request(),
    )
    .await;
    assert!(!live.is_empty());
    assert!(live.iter().all(|p| p["published"] == true));
}

#[actix_web::test]
async fn test_update_is_partial() {
    let state = seeded();
    let before = state.store.get_post("1").await.unwrap().unwrap();
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/1")
            .set_json(json!({ "title": "Renamed" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["content"], before.content.as_str());
    assert_eq!(updated["slug"], before.slug.as_str());
    assert_eq!(updated["tags"], json!(before.tags));
    assert_eq!(updated["metadata"]["views"], before.metadata.views);

    let missing = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/missing")
            .set_json(json!({ "title": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/1")
            .set_json(json!({ "slug": "Not A Slug" }))
            .to_request(),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_twice() {
    let app = app!(seeded());

    let first = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/blog-posts/1").to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/blog-posts/1").to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_comments_flow() {
    let app = app!(seeded());

    for content in ["First", "Second"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/blog-posts/1/comments")
                .set_json(json!({
                    "author": "Ada",
                    "email": "ada@example.com",
                    "content": content
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let comment: Value = test::read_body_json(resp).await;
        assert_eq!(comment["postId"], "1");
    }

    let comments: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog-posts/1/comments")
            .to_request(),
    )
    .await;
    let contents: Vec<&str> = comments
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["First", "Second"]);

    let invalid = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts/1/comments")
            .set_json(json!({ "author": "", "email": "a@b.c", "content": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let orphan = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts/ghost/comments")
            .set_json(json!({ "author": "Ada", "email": "a@b.c", "content": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(orphan.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_upload_and_featured_image() {
    let app = app!(seeded());

    let upload: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/objects/upload").to_request(),
    )
    .await;
    let upload_url = upload["uploadURL"].as_str().unwrap().to_string();
    assert!(upload_url.starts_with("https://storage.googleapis.com/folio-bucket/.private/uploads/"));

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/1/featured-image")
            .set_json(json!({ "imageURL": upload_url }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let object_path = body["objectPath"].as_str().unwrap();
    assert!(object_path.starts_with("/objects/uploads/"));
    assert_eq!(body["post"]["featuredImage"], object_path);

    let missing_url = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/1/featured-image")
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(missing_url.status(), StatusCode::BAD_REQUEST);

    let missing_post = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/blog-posts/ghost/featured-image")
            .set_json(json!({ "imageURL": "https://example.com/a.png" }))
            .to_request(),
    )
    .await;
    assert_eq!(missing_post.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_serve_object() {
    let (state, objects) = state_with(InMemoryContentStore::new(), &[]);
    objects
        .put("/objects/uploads/pic", "image/png", vec![0x89u8, 0x50, 0x4e, 0x47])
        .await;
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/objects/uploads/pic").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "private, max-age=3600"
    );
    assert_eq!(resp.headers().get(header::CONTENT_LENGTH).unwrap(), "4");
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.len(), 4);

    let missing = test::call_service(
        &app,
        test::TestRequest::get().uri("/objects/uploads/nothing").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_serve_object_with_unreachable_storage_is_404() {
    let (mut state, _) = state_with(InMemoryContentStore::new(), &[]);
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", closed.local_addr().unwrap());
    drop(closed);
    state.objects = Arc::new(
        SidecarObjectStorage::new(SidecarConfig {
            endpoint,
            private_dir: Some("/b/.private".to_string()),
        })
        .unwrap(),
    );
    let app = app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/objects/uploads/x").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_contact_swallows_relay_failure() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/contact")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "Hello there"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let invalid = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/contact")
            .set_json(json!({ "name": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_import_content_placeholder() {
    let app = app!(seeded());

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/import-content")
            .set_json(json!({ "url": "https://example.com/post" }))
            .to_request(),
    )
    .await;
    assert_eq!(body["url"], "https://example.com/post");
    assert!(body["message"].is_string());

    for bad in [json!({ "url": 5 }), json!({})] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/import-content")
                .set_json(bad)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn test_sitemap_lists_published_posts() {
    let app = app!(seeded());

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blog-posts")
            .set_json(draft())
            .to_request(),
    )
    .await;

    for uri in ["/sitemap.xml", "/api/sitemap"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("application/xml"));

        let xml = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(xml.contains(
            "<loc>https://alexshyaka.site/blog/building-market-ready-tech-skills-african-graduates</loc>"
        ));
        assert!(xml.contains("<lastmod>2024-01-15</lastmod>"));
        assert!(!xml.contains("draft-notes"));
    }
}

#[actix_web::test]
async fn test_admin_verify() {
    let app = app!(seeded());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": ADMIN_PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["sessionTtlSecs"], 14_400);

    let wrong = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": "admin123" }))
            .to_request(),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
}

#[cfg(feature = "rate-limit")]
#[actix_web::test]
async fn test_admin_verify_is_rate_limited() {
    let (state, _) = state_with(
        InMemoryContentStore::new(),
        &[("ADMIN_RATE_LIMIT_MAX_REQUESTS", "2")],
    );
    let app = app!(state);

    let attempt = || {
        test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": "guess" }))
            .to_request()
    };

    for _ in 0..2 {
        let resp = test::call_service(&app, attempt()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let limited = test::call_service(&app, attempt()).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key(header::RETRY_AFTER));
}
