//! In-memory content store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::{BlogPost, BlogPostPatch, Comment, NewBlogPost, NewComment, PostFilter};
use folio_core::error::RepoError;
use folio_core::ports::{BlogPostRepository, CommentRepository};

use super::seed::sample_posts;

/// Content store backed by insertion-ordered vectors behind async locks.
///
/// Every operation takes the lock once for its whole duration, so a view
/// increment never interleaves with another write.
/// Note: Data is lost on process restart.
pub struct InMemoryContentStore {
    posts: RwLock<Vec<BlogPost>>,
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryContentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Store preloaded with the sample posts.
    pub fn seeded() -> Self {
        Self::with_posts(sample_posts())
    }

    /// Store preloaded with `posts`, kept in the given order.
    pub fn with_posts(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: RwLock::new(posts),
            comments: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryContentStore {
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(filter.select(posts.iter().cloned()))
    }

    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create_post(&self, input: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::new(input);
        tracing::debug!(post_id = %post.id, slug = %post.slug, "Creating blog post");

        let mut posts = self.posts.write().await;
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: &str,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.apply(patch);
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<BlogPost>, RepoError> {
        let needle = query.to_lowercase();
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| p.matches(&needle)).cloned().collect())
    }

    async fn fetch_and_record_view(
        &self,
        slug_or_id: &str,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.slug == slug_or_id)
            .or_else(|| posts.iter().position(|p| p.id == slug_or_id));

        Ok(index.map(|i| {
            let post = &mut posts[i];
            post.record_view();
            post.clone()
        }))
    }
}

#[async_trait]
impl CommentRepository for InMemoryContentStore {
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut found: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, RepoError> {
        let comment = Comment::new(input);
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());
        Ok(comment)
    }
}
