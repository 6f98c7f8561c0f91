//! Outbound email port.

use async_trait::async_trait;

use crate::domain::ContactMessage;

/// Mailer trait - relays contact form messages to the site owner.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError>;
}

/// Mail relay errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),

    #[error("Mail transport failed: {0}")]
    Transport(String),
}
