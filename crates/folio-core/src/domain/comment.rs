use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Reader comment on a blog post.
///
/// `post_id` is not checked against existing posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time.
    pub fn new(input: NewComment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id: input.post_id,
            author: input.author,
            email: input.email,
            content: input.content,
            created_at: Utc::now(),
        }
    }
}

/// Insert schema for comments. The HTTP layer fills `post_id` from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    #[validate(length(min = 1, message = "Post id is required"))]
    pub post_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub content: String,
}
