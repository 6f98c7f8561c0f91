//! Object storage port - uploaded images live in an external bucket.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

/// Body of a stored object, delivered in chunks as the backend produces them.
pub type ObjectBody = BoxStream<'static, Result<Bytes, ObjectStorageError>>;

/// An object read back from storage.
pub struct StoredObject {
    pub content_type: String,
    /// Size in bytes when the backend reports it.
    pub content_length: Option<u64>,
    pub body: ObjectBody,
}

impl StoredObject {
    /// Wrap an object that is already in memory.
    pub fn from_bytes(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            content_type: content_type.into(),
            content_length: Some(bytes.len() as u64),
            body: stream::once(async move { Ok(bytes) }).boxed(),
        }
    }

    /// Drain the body into one buffer.
    pub async fn into_bytes(self) -> Result<Vec<u8>, ObjectStorageError> {
        self.body
            .try_fold(Vec::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await
    }
}

impl fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredObject")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Object storage trait - abstraction over bucket backends.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Issue a short-lived URL the client can PUT a new object to.
    async fn upload_url(&self) -> Result<String, ObjectStorageError>;

    /// Map an upload URL issued by the bucket to a stable `/objects/...` path.
    /// Values that do not point into the bucket are returned as they are.
    fn normalize_object_path(&self, raw: &str) -> String;

    /// Fetch the object behind an `/objects/...` path.
    async fn fetch_object(&self, object_path: &str)
    -> Result<Option<StoredObject>, ObjectStorageError>;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStorageError {
    #[error("Object storage is not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to sign object URL: {0}")]
    Signing(String),

    #[error("Object transfer failed: {0}")]
    Transfer(String),
}
