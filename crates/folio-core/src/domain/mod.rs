//! Domain entities - the core business objects.

mod comment;
mod contact;
mod post;

pub use comment::{Comment, NewComment};
pub use contact::ContactMessage;
pub use post::{
    BlogPost, BlogPostPatch, DEFAULT_AUTHOR, MetadataPatch, NewBlogPost, PostFilter, PostMetadata,
    WORDS_PER_MINUTE, is_valid_slug, read_time_minutes, slugify,
};
