//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mailer;
mod object_storage;
mod rate_limit;
mod repository;

pub use auth::{AuthError, PasswordService};
pub use mailer::{MailError, Mailer};
pub use object_storage::{ObjectBody, ObjectStorage, ObjectStorageError, StoredObject};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BlogPostRepository, CommentRepository, ContentStore};
