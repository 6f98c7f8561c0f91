//! Content import handler.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use folio_shared::dto::ImportContentResponse;

use crate::middleware::error::{AppError, AppResult};

/// POST /api/import-content
///
/// Acknowledges the URL without fetching anything.
pub async fn import_content(body: web::Json<Value>) -> AppResult<HttpResponse> {
    let url = body
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("Valid URL is required".to_string()))?;

    tracing::info!(url = %url, "Content import requested");

    Ok(HttpResponse::Ok().json(ImportContentResponse {
        message: "Content import functionality would be implemented here".to_string(),
        url: url.to_string(),
    }))
}
