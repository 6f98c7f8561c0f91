//! HTTP handlers and route configuration.

mod admin;
mod blog_posts;
mod comments;
mod contact;
mod health;
mod import;
mod objects;
mod sitemap;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Largest accepted JSON body. Posts carry full markdown.
const JSON_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.app_data(web::Data::new(state.clone()))
        .app_data(json_config)
        .route("/sitemap.xml", web::get().to(sitemap::sitemap))
        .route(
            "/objects/{object_path:.*}",
            web::get().to(objects::serve_object),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/sitemap", web::get().to(sitemap::sitemap))
                .route("/contact", web::post().to(contact::submit))
                .route("/import-content", web::post().to(import::import_content))
                .route("/objects/upload", web::post().to(objects::upload_url))
                .service(admin_scope(state))
                .service(
                    web::scope("/blog-posts")
                        .route("", web::get().to(blog_posts::list))
                        .route("", web::post().to(blog_posts::create))
                        .route("/{slug_or_id}", web::get().to(blog_posts::get))
                        .route("/{id}", web::put().to(blog_posts::update))
                        .route("/{id}", web::delete().to(blog_posts::delete))
                        .route(
                            "/{id}/featured-image",
                            web::put().to(blog_posts::set_featured_image),
                        )
                        .route("/{post_id}/comments", web::get().to(comments::list))
                        .route("/{post_id}/comments", web::post().to(comments::create)),
                ),
        );
}

#[cfg(feature = "rate-limit")]
fn admin_scope(state: &AppState) -> impl actix_web::dev::HttpServiceFactory + use<> {
    use crate::middleware::rate_limit::RateLimitMiddleware;

    web::scope("/admin")
        .wrap(RateLimitMiddleware::new(state.admin_limiter.clone()))
        .route("/verify", web::post().to(admin::verify))
}

#[cfg(not(feature = "rate-limit"))]
fn admin_scope(_state: &AppState) -> impl actix_web::dev::HttpServiceFactory + use<> {
    web::scope("/admin").route("/verify", web::post().to(admin::verify))
}
