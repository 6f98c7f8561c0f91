//! Object storage adapters for uploaded images.
//!
//! Objects live in a bucket under a private directory. Clients upload
//! straight to the bucket through a signed URL and the site serves them
//! back as `/objects/{entity_id}`.

mod memory;
mod paths;
mod sidecar;

pub use memory::InMemoryObjectStorage;
pub use paths::{ObjectLocation, ObjectPaths, STORAGE_URL_PREFIX, UPLOAD_URL_TTL_SECS};
pub use sidecar::{SidecarConfig, SidecarObjectStorage};
