//! Comment handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use folio_core::domain::NewComment;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/blog-posts/{post_id}/comments
pub async fn list(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comments = state.store.comments_for_post(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/blog-posts/{post_id}/comments
///
/// The post id comes from the path; the post is not required to exist.
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let input = NewComment {
        post_id: path.into_inner(),
        ..body.into_inner()
    };
    input.validate()?;

    let comment = state.store.create_comment(input).await?;
    tracing::debug!(post_id = %comment.post_id, comment_id = %comment.id, "Comment created");

    Ok(HttpResponse::Created().json(comment))
}
