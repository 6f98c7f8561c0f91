//! Blog post handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use folio_core::domain::{BlogPostPatch, NewBlogPost, PostFilter};
use folio_shared::dto::{BlogPostQuery, FeaturedImageRequest, FeaturedImageResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const POST_NOT_FOUND: &str = "Blog post not found";

/// GET /api/blog-posts
///
/// A non-empty `search` runs a text search, otherwise the listing applies
/// `published`, `limit` and `offset`.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<BlogPostQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let published = parse_published(query.published.as_deref());

    let posts = match query.search.as_deref().filter(|s| !s.is_empty()) {
        Some(term) => state
            .store
            .search_posts(term)
            .await?
            .into_iter()
            .filter(|p| published.is_none_or(|want| p.published == want))
            .collect(),
        None => {
            let filter = PostFilter {
                published,
                limit: parse_count(query.limit.as_deref()),
                offset: parse_count(query.offset.as_deref()),
            };
            state.store.list_posts(filter).await?
        }
    };

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blog-posts/{slug_or_id}
///
/// Counts a view on every successful fetch.
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug_or_id = path.into_inner();

    let post = state
        .store
        .fetch_and_record_view(&slug_or_id)
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blog-posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<NewBlogPost>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let post = state.store.create_post(input).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/blog-posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BlogPostPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();
    patch.validate()?;

    let post = state
        .store
        .update_post(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blog-posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.store.delete_post(&id).await? {
        return Err(AppError::NotFound(POST_NOT_FOUND.to_string()));
    }

    tracing::info!(post_id = %id, "Blog post deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/blog-posts/{id}/featured-image
pub async fn set_featured_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FeaturedImageRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let image_url = body
        .into_inner()
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("imageURL is required".to_string()))?;

    let object_path = state.objects.normalize_object_path(&image_url);

    let post = state
        .store
        .update_post(&id, BlogPostPatch::featured_image(object_path.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(FeaturedImageResponse { object_path, post }))
}

fn parse_published(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Positive integers only; anything else means "not given".
fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse().ok().filter(|n| *n > 0)
}
