//! Contact form handler.

use actix_web::{HttpResponse, web};
use validator::Validate;

use folio_core::domain::ContactMessage;
use folio_shared::dto::SuccessResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/contact
///
/// Relay failures are logged and the sender still sees success.
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactMessage>,
) -> AppResult<HttpResponse> {
    let message = body.into_inner();
    message.validate()?;

    if let Err(e) = state.mailer.send_contact(&message).await {
        tracing::error!(error = %e, "Failed to relay contact message");
    }

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
