use folio_core::ports::ObjectStorageError;
use uuid::Uuid;

/// Public host prefix of bucket URLs.
pub const STORAGE_URL_PREFIX: &str = "https://storage.googleapis.com/";

/// Lifetime of a signed upload URL.
pub const UPLOAD_URL_TTL_SECS: i64 = 900;

const OBJECTS_PREFIX: &str = "/objects/";

/// A bucket and an object name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub name: String,
}

impl ObjectLocation {
    /// Unsigned public URL of this object.
    pub fn public_url(&self) -> String {
        format!("{STORAGE_URL_PREFIX}{}/{}", self.bucket, self.name)
    }
}

/// Mapping between bucket URLs and `/objects/...` paths for one private
/// directory, e.g. `/my-bucket/.private`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPaths {
    private_dir: String,
    bucket: String,
    prefix: String,
}

impl ObjectPaths {
    pub fn new(private_dir: &str) -> Result<Self, ObjectStorageError> {
        let trimmed = private_dir.trim().trim_matches('/');
        let (bucket, prefix) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        if bucket.is_empty() {
            return Err(ObjectStorageError::NotConfigured(
                "PRIVATE_OBJECT_DIR must name a bucket".to_string(),
            ));
        }

        Ok(Self {
            private_dir: format!("/{trimmed}"),
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }

    pub fn private_dir(&self) -> &str {
        &self.private_dir
    }

    /// Fresh location for an upload: `{private_dir}/uploads/{uuid}`.
    pub fn new_upload_location(&self) -> ObjectLocation {
        self.location(&format!("uploads/{}", Uuid::new_v4()))
    }

    fn location(&self, entity_id: &str) -> ObjectLocation {
        let name = if self.prefix.is_empty() {
            entity_id.to_string()
        } else {
            format!("{}/{entity_id}", self.prefix)
        };
        ObjectLocation {
            bucket: self.bucket.clone(),
            name,
        }
    }

    /// Map a bucket URL under the private directory to `/objects/{entity_id}`.
    ///
    /// Bucket URLs elsewhere come back as their path. Anything else is
    /// returned untouched.
    pub fn normalize(&self, raw: &str) -> String {
        if !raw.starts_with(STORAGE_URL_PREFIX) {
            return raw.to_string();
        }

        let Ok(url) = url::Url::parse(raw) else {
            return raw.to_string();
        };
        let path = url.path();

        match path
            .strip_prefix(self.private_dir.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            Some(entity_id) if !entity_id.is_empty() => format!("{OBJECTS_PREFIX}{entity_id}"),
            _ => path.to_string(),
        }
    }

    /// Bucket location behind an `/objects/{entity_id}` path.
    pub fn resolve(&self, object_path: &str) -> Option<ObjectLocation> {
        let entity_id = object_path.strip_prefix(OBJECTS_PREFIX)?;
        if entity_id.is_empty() {
            return None;
        }
        Some(self.location(entity_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> ObjectPaths {
        ObjectPaths::new("/folio-bucket/.private/").unwrap()
    }

    #[test]
    fn test_private_dir_is_normalized() {
        assert_eq!(paths().private_dir(), "/folio-bucket/.private");
        assert_eq!(
            ObjectPaths::new("folio-bucket/.private").unwrap().private_dir(),
            "/folio-bucket/.private"
        );
        assert!(ObjectPaths::new("  ").is_err());
        assert!(ObjectPaths::new("/").is_err());
    }

    #[test]
    fn test_upload_location_is_under_private_dir() {
        let location = paths().new_upload_location();
        assert_eq!(location.bucket, "folio-bucket");
        assert!(location.name.starts_with(".private/uploads/"));
        assert_ne!(location, paths().new_upload_location());
    }

    #[test]
    fn test_normalize_private_upload_url() {
        let raw = "https://storage.googleapis.com/folio-bucket/.private/uploads/abc-123?X-Goog-Signature=zzz";
        assert_eq!(paths().normalize(raw), "/objects/uploads/abc-123");
    }

    #[test]
    fn test_normalize_leaves_other_urls() {
        let outside = "https://storage.googleapis.com/folio-bucket/public/cat.png";
        assert_eq!(paths().normalize(outside), "/folio-bucket/public/cat.png");

        let foreign = "https://images.unsplash.com/photo-1?w=500";
        assert_eq!(paths().normalize(foreign), foreign);
        assert_eq!(paths().normalize("/objects/uploads/x"), "/objects/uploads/x");
    }

    #[test]
    fn test_resolve_object_path() {
        let location = paths().resolve("/objects/uploads/abc").unwrap();
        assert_eq!(location.bucket, "folio-bucket");
        assert_eq!(location.name, ".private/uploads/abc");
        assert_eq!(
            location.public_url(),
            "https://storage.googleapis.com/folio-bucket/.private/uploads/abc"
        );

        assert!(paths().resolve("/objects/").is_none());
        assert!(paths().resolve("/elsewhere/abc").is_none());
    }
}
