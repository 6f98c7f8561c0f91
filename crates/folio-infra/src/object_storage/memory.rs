use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use folio_core::ports::{ObjectStorage, ObjectStorageError, StoredObject};

use super::paths::ObjectPaths;

/// In-memory object storage for development and tests.
///
/// Upload URLs are plain bucket URLs; nothing listens on them, objects are
/// added with [`InMemoryObjectStorage::put`].
pub struct InMemoryObjectStorage {
    paths: ObjectPaths,
    objects: RwLock<HashMap<String, (String, Bytes)>>,
}

impl InMemoryObjectStorage {
    pub fn new(paths: ObjectPaths) -> Self {
        Self {
            paths,
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Store an object under an `/objects/...` path.
    pub async fn put(&self, object_path: &str, content_type: &str, bytes: impl Into<Bytes>) {
        let mut objects = self.objects.write().await;
        objects.insert(
            object_path.to_string(),
            (content_type.to_string(), bytes.into()),
        );
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload_url(&self) -> Result<String, ObjectStorageError> {
        Ok(self.paths.new_upload_location().public_url())
    }

    fn normalize_object_path(&self, raw: &str) -> String {
        self.paths.normalize(raw)
    }

    async fn fetch_object(
        &self,
        object_path: &str,
    ) -> Result<Option<StoredObject>, ObjectStorageError> {
        let objects = self.objects.read().await;
        Ok(objects.get(object_path).map(|(content_type, bytes)| {
            StoredObject::from_bytes(content_type.as_str(), bytes.clone())
        }))
    }
}
