//! XML sitemap.

use actix_web::{HttpResponse, web};

use folio_core::domain::{BlogPost, PostFilter};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Static pages as (path, changefreq, priority).
const STATIC_PAGES: &[(&str, &str, &str)] = &[("/", "weekly", "1.0"), ("/blog", "daily", "0.9")];

/// GET /sitemap.xml and GET /api/sitemap
pub async fn sitemap(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .store
        .list_posts(PostFilter {
            published: Some(true),
            ..Default::default()
        })
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(render(&state.site_url, &posts)))
}

fn render(site_url: &str, posts: &[BlogPost]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, changefreq, priority) in STATIC_PAGES {
        push_url(&mut xml, &format!("{site_url}{path}"), None, changefreq, priority);
    }

    for post in posts {
        let lastmod = post.updated_at.format("%Y-%m-%d").to_string();
        push_url(
            &mut xml,
            &format!("{site_url}/blog/{}", post.slug),
            Some(&lastmod),
            "monthly",
            "0.8",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape(loc)));
    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    }
    xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    xml.push_str(&format!("    <priority>{priority}</priority>\n"));
    xml.push_str("  </url>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
