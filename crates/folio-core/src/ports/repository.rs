use async_trait::async_trait;

use crate::domain::{BlogPost, BlogPostPatch, Comment, NewBlogPost, NewComment, PostFilter};
use crate::error::RepoError;

/// Blog post persistence and queries.
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Posts matching `filter`, newest first, sliced by offset then limit.
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<BlogPost>, RepoError>;

    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>, RepoError>;

    /// First post carrying `slug`.
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError>;

    async fn create_post(&self, input: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Returns `None` when no post has this id.
    async fn update_post(
        &self,
        id: &str,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepoError>;

    /// Returns `true` when a post existed and was removed.
    async fn delete_post(&self, id: &str) -> Result<bool, RepoError>;

    /// Case-insensitive substring search over title, content and tags.
    /// Does not filter on `published`.
    async fn search_posts(&self, query: &str) -> Result<Vec<BlogPost>, RepoError>;

    /// Resolve by slug, then by id, and count one view.
    ///
    /// Returns the post as stored after the increment.
    async fn fetch_and_record_view(&self, slug_or_id: &str)
    -> Result<Option<BlogPost>, RepoError>;
}

/// Comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments for a post, oldest first.
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>, RepoError>;

    async fn create_comment(&self, input: NewComment) -> Result<Comment, RepoError>;
}

/// The content store: sole owner of post and comment state.
pub trait ContentStore: BlogPostRepository + CommentRepository {}

impl<T> ContentStore for T where T: BlogPostRepository + CommentRepository {}
