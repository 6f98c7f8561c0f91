//! Object upload and download handlers.

use actix_web::{HttpResponse, http::header, web};

use folio_shared::dto::UploadUrlResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const OBJECT_CACHE_CONTROL: &str = "private, max-age=3600";

/// POST /api/objects/upload
pub async fn upload_url(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let upload_url = state
        .objects
        .upload_url()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(UploadUrlResponse { upload_url }))
}

/// GET /objects/{object_path:.*}
pub async fn serve_object(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let object_path = format!("/objects/{}", path.into_inner());

    let object = match state.objects.fetch_object(&object_path).await {
        Ok(Some(object)) => object,
        Ok(None) => return Err(AppError::NotFound("Object not found".to_string())),
        Err(e) => {
            tracing::error!(object_path = %object_path, "Object fetch failed: {}", e);
            return Err(AppError::NotFound("Object not found".to_string()));
        }
    };

    let mut response = HttpResponse::Ok();
    response
        .insert_header((header::CONTENT_TYPE, object.content_type))
        .insert_header((header::CACHE_CONTROL, OBJECT_CACHE_CONTROL));
    if let Some(len) = object.content_length {
        response.no_chunking(len);
    }

    Ok(response.streaming(object.body))
}
