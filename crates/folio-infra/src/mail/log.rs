use async_trait::async_trait;

use folio_core::domain::ContactMessage;
use folio_core::ports::{MailError, Mailer};

/// Mailer used when no provider is configured. Messages are only logged.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        tracing::info!(
            from = %message.email,
            subject = %message.subject_line(),
            "Contact message received (mail relay not configured)"
        );
        Ok(())
    }
}
