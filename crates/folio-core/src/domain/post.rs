use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Author recorded on posts that do not name one.
pub const DEFAULT_AUTHOR: &str = "Alex Shyaka";

/// Reading speed used to estimate `readTime`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Counters and attribution stored alongside a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// Estimated reading time in minutes.
    pub read_time: u32,
    /// Number of individual fetches of the post.
    pub views: u64,
    pub author: String,
}

impl Default for PostMetadata {
    fn default() -> Self {
        Self {
            read_time: 0,
            views: 0,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// Partial metadata as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    pub read_time: Option<u32>,
    pub views: Option<u64>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
}

impl MetadataPatch {
    /// Resolves every field from this patch, then from `existing`, then from
    /// the defaults, in that order.
    pub fn merge_over(&self, existing: Option<&PostMetadata>) -> PostMetadata {
        let defaults = PostMetadata::default();

        PostMetadata {
            read_time: self
                .read_time
                .or(existing.map(|m| m.read_time))
                .unwrap_or(defaults.read_time),
            views: self
                .views
                .or(existing.map(|m| m.views))
                .unwrap_or(defaults.views),
            author: self
                .author
                .clone()
                .or_else(|| existing.map(|m| m.author.clone()))
                .unwrap_or(defaults.author),
        }
    }
}

/// Blog post entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Markdown body.
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub metadata: PostMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a post from validated input, assigning id and timestamps.
    pub fn new(input: NewBlogPost) -> Self {
        let now = Utc::now();
        let slug = input
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&input.title));

        let mut metadata = input.metadata.unwrap_or_default();
        metadata
            .read_time
            .get_or_insert_with(|| read_time_minutes(&input.content));

        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            slug,
            metadata: metadata.merge_over(None),
            content: input.content,
            excerpt: input.excerpt,
            featured_image: input.featured_image,
            tags: input.tags.unwrap_or_default(),
            published: input.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this post and refresh `updated_at`.
    pub fn apply(&mut self, patch: BlogPostPatch) {
        let BlogPostPatch {
            title,
            slug,
            content,
            excerpt,
            featured_image,
            tags,
            published,
            metadata,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(excerpt) = excerpt {
            self.excerpt = excerpt;
        }
        if let Some(featured_image) = featured_image {
            self.featured_image = featured_image;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(published) = published {
            self.published = published;
        }
        if let Some(metadata) = metadata {
            self.metadata = metadata.merge_over(Some(&self.metadata));
        }

        self.touch();
    }

    /// Count one more view.
    pub fn record_view(&mut self) {
        self.metadata.views = self.metadata.views.saturating_add(1);
        self.touch();
    }

    /// Case-insensitive substring match against title, content and tags.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// The excerpt, or the first `max_chars` characters of the content.
    pub fn preview(&self, max_chars: usize) -> String {
        if let Some(excerpt) = self.excerpt.as_deref().filter(|e| !e.is_empty()) {
            return excerpt.to_string();
        }

        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Insert schema for blog posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_slug_source"))]
pub struct NewBlogPost {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Derived from the title when absent.
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    #[validate(nested)]
    pub metadata: Option<MetadataPatch>,
}

/// Partial insert schema used for updates.
///
/// `excerpt` and `featured_image` distinguish an absent field (keep) from an
/// explicit `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub excerpt: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub featured_image: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    #[validate(nested)]
    pub metadata: Option<MetadataPatch>,
}

impl BlogPostPatch {
    /// Patch that only replaces the featured image.
    pub fn featured_image(path: impl Into<String>) -> Self {
        Self {
            featured_image: Some(Some(path.into())),
            ..Default::default()
        }
    }
}

/// Listing options for posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PostFilter {
    /// Filter, sort newest first, then skip `offset` and take `limit`.
    ///
    /// Posts sharing a `created_at` keep their input order.
    pub fn select<I>(&self, posts: I) -> Vec<BlogPost>
    where
        I: IntoIterator<Item = BlogPost>,
    {
        let mut selected: Vec<BlogPost> = posts
            .into_iter()
            .filter(|p| self.published.is_none_or(|published| p.published == published))
            .collect();

        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        selected
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Derive a URL-safe slug: lowercase, runs of anything other than `[a-z0-9]`
/// become one hyphen, no leading or trailing hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Whether `slug` is already in canonical slug form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

/// Estimated minutes to read `content`, rounded up.
pub fn read_time_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug may only contain lowercase letters, digits and single hyphens".into());
        Err(err)
    }
}

fn validate_slug_source(post: &NewBlogPost) -> Result<(), ValidationError> {
    let supplied = post.slug.as_deref().is_some_and(|s| !s.is_empty());
    if supplied || !slugify(&post.title).is_empty() {
        return Ok(());
    }

    let mut err = ValidationError::new("slug");
    err.message = Some("A slug cannot be derived from this title; supply one".into());
    Err(err)
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
