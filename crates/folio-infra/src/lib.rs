//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! content stores, object storage, mail relay, admin gate and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory content store only
//! - `postgres` - PostgreSQL content store via SeaORM
//! - `auth` - Argon2 hashing for the admin password gate (plain comparison without it)
//! - `rate-limit` - Rate limiting via governor

pub mod auth;
pub mod database;
pub mod mail;
pub mod object_storage;
pub mod store;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - always available
pub use auth::AdminGate;
pub use database::DatabaseConfig;
pub use mail::{LogMailer, SendGridConfig, SendGridMailer};
pub use object_storage::{InMemoryObjectStorage, ObjectPaths, SidecarConfig, SidecarObjectStorage};
pub use store::InMemoryContentStore;

#[cfg(feature = "postgres")]
pub use database::PostgresContentStore;

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
