//! Bucket access through the local signing sidecar.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use futures::{StreamExt, TryStreamExt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use folio_core::ports::{ObjectStorage, ObjectStorageError, StoredObject};

use super::paths::{ObjectLocation, ObjectPaths, UPLOAD_URL_TTL_SECS};

/// Lifetime of the signed URL used to read an object back.
const DOWNLOAD_URL_TTL_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct SidecarConfig {
    /// Base URL of the signing sidecar, e.g. `http://127.0.0.1:1106`.
    pub endpoint: String,
    /// `PRIVATE_OBJECT_DIR`; uploads are refused when unset.
    pub private_dir: Option<String>,
}

#[derive(Serialize)]
struct SignRequest<'a> {
    bucket_name: &'a str,
    object_name: &'a str,
    method: &'a str,
    expires_at: String,
}

#[derive(Deserialize)]
struct SignResponse {
    signed_url: String,
}

/// Object storage that asks a sidecar to sign bucket URLs.
pub struct SidecarObjectStorage {
    client: reqwest::Client,
    sign_url: String,
    paths: Option<ObjectPaths>,
}

impl SidecarObjectStorage {
    pub fn new(config: SidecarConfig) -> Result<Self, ObjectStorageError> {
        let paths = config
            .private_dir
            .as_deref()
            .map(ObjectPaths::new)
            .transpose()?;

        if paths.is_none() {
            tracing::warn!("PRIVATE_OBJECT_DIR not set, image uploads are disabled");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            sign_url: format!(
                "{}/object-storage/signed-object-url",
                config.endpoint.trim_end_matches('/')
            ),
            paths,
        })
    }

    fn paths(&self) -> Result<&ObjectPaths, ObjectStorageError> {
        self.paths.as_ref().ok_or_else(|| {
            ObjectStorageError::NotConfigured("PRIVATE_OBJECT_DIR not set".to_string())
        })
    }

    async fn sign(
        &self,
        location: &ObjectLocation,
        method: &str,
        ttl_secs: i64,
    ) -> Result<String, ObjectStorageError> {
        let request = SignRequest {
            bucket_name: &location.bucket,
            object_name: &location.name,
            method,
            expires_at: (Utc::now() + Duration::seconds(ttl_secs)).to_rfc3339(),
        };

        let response = self
            .client
            .post(&self.sign_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ObjectStorageError::Signing(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ObjectStorageError::Signing(format!(
                "sidecar responded with {status}"
            )));
        }

        let body: SignResponse = response
            .json()
            .await
            .map_err(|e| ObjectStorageError::Signing(e.to_string()))?;

        Ok(body.signed_url)
    }
}

#[async_trait]
impl ObjectStorage for SidecarObjectStorage {
    async fn upload_url(&self) -> Result<String, ObjectStorageError> {
        let location = self.paths()?.new_upload_location();
        tracing::debug!(object = %location.name, "Signing upload URL");
        self.sign(&location, "PUT", UPLOAD_URL_TTL_SECS).await
    }

    fn normalize_object_path(&self, raw: &str) -> String {
        match &self.paths {
            Some(paths) => paths.normalize(raw),
            None => raw.to_string(),
        }
    }

    async fn fetch_object(
        &self,
        object_path: &str,
    ) -> Result<Option<StoredObject>, ObjectStorageError> {
        let Some(location) = self.paths()?.resolve(object_path) else {
            return Ok(None);
        };

        let signed = self.sign(&location, "GET", DOWNLOAD_URL_TTL_SECS).await?;
        let response = self
            .client
            .get(&signed)
            .send()
            .await
            .map_err(|e| ObjectStorageError::Transfer(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                return Err(ObjectStorageError::Transfer(format!(
                    "bucket responded with {status}"
                )));
            }
            _ => {}
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let content_length = response.content_length();
        let body = response
            .bytes_stream()
            .map_err(|e| ObjectStorageError::Transfer(e.to_string()))
            .boxed();

        Ok(Some(StoredObject {
            content_type,
            content_length,
            body,
        }))
    }
}
