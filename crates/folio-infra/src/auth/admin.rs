//! Shared-secret gate in front of the editor.
//!
//! This only decides whether the client may unlock its editor UI. No server
//! session or token is issued and write endpoints stay open.

use folio_core::ports::{AuthError, PasswordService};

#[cfg(feature = "auth")]
use super::Argon2PasswordService;
#[cfg(not(feature = "auth"))]
use super::PlainPasswordService;

/// Password used when `ADMIN_PASSWORD` is not set.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub struct AdminGate {
    service: Box<dyn PasswordService>,
    hash: String,
}

impl AdminGate {
    /// Hash the configured secret once, falling back to
    /// [`DEFAULT_ADMIN_PASSWORD`]. Without the `auth` feature the secret is
    /// compared as plain text.
    pub fn new(password: Option<&str>, production: bool) -> Result<Self, AuthError> {
        #[cfg(feature = "auth")]
        let service: Box<dyn PasswordService> = Box::new(Argon2PasswordService::new());
        #[cfg(not(feature = "auth"))]
        let service: Box<dyn PasswordService> = Box::new(PlainPasswordService);

        Self::with_service(service, password, production)
    }

    pub fn with_service(
        service: Box<dyn PasswordService>,
        password: Option<&str>,
        production: bool,
    ) -> Result<Self, AuthError> {
        let password = match password.filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => {
                if production {
                    tracing::error!(
                        "SECURITY: Using default admin password in production! Set ADMIN_PASSWORD environment variable."
                    );
                } else {
                    tracing::warn!("Using default admin password. Set ADMIN_PASSWORD for production use.");
                }
                DEFAULT_ADMIN_PASSWORD
            }
        };

        let hash = service.hash(password)?;
        Ok(Self { service, hash })
    }

    /// Whether `candidate` is the admin password.
    pub fn verify(&self, candidate: &str) -> Result<bool, AuthError> {
        self.service.verify(candidate, &self.hash)
    }
}
