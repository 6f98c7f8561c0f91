//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string accepted by `GET /api/blog-posts`.
///
/// Values stay raw strings; the server interprets them leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPostQuery {
    pub published: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub search: Option<String>,
}

/// Request to point a post at an uploaded image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedImageRequest {
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
}

/// Response to a featured image update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImageResponse<P> {
    pub object_path: String,
    pub post: P,
}

/// Signed URL the client uploads an image to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}

/// Request to check the admin password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminVerifyRequest {
    #[serde(default)]
    pub password: String,
}

/// Successful admin password check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminVerifyResponse {
    pub success: bool,
    /// How long the client may keep its admin flag.
    pub session_ttl_secs: u64,
}

/// Generic `{ "success": true }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Acknowledgement of a content import request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportContentResponse {
    pub message: String,
    pub url: String,
}
