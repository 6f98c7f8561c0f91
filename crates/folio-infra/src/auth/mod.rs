//! Admin password check.

mod admin;
#[cfg(feature = "auth")]
mod password;
#[cfg(any(not(feature = "auth"), test))]
mod plain;

pub use admin::{AdminGate, DEFAULT_ADMIN_PASSWORD};
#[cfg(feature = "auth")]
pub use password::Argon2PasswordService;
#[cfg(any(not(feature = "auth"), test))]
pub use plain::PlainPasswordService;
