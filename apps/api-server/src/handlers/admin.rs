//! Admin password check.
//!
//! Placeholder gate: a match only tells the client it may unlock the
//! editor. Nothing is issued and no endpoint checks it afterwards.

use actix_web::{HttpResponse, web};

use folio_shared::dto::{AdminVerifyRequest, AdminVerifyResponse};
use folio_shared::session::ADMIN_SESSION_TTL_MS;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/admin/verify
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<AdminVerifyRequest>,
) -> AppResult<HttpResponse> {
    let password = body.into_inner().password;
    let gate = state.admin.clone();

    // Argon2 verification is CPU bound.
    let matched = web::block(move || gate.verify(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !matched {
        tracing::warn!("Admin password rejected");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok(HttpResponse::Ok().json(AdminVerifyResponse {
        success: true,
        session_ttl_secs: (ADMIN_SESSION_TTL_MS / 1000) as u64,
    }))
}
