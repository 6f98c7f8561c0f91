//! Blog post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use folio_core::domain::{BlogPost, PostMetadata};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(nullable)]
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: MetadataJson,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Shape of the `metadata` jsonb column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct MetadataJson {
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<MetadataJson> for PostMetadata {
    fn from(json: MetadataJson) -> Self {
        let defaults = PostMetadata::default();
        Self {
            read_time: json.read_time,
            views: json.views,
            author: json.author.unwrap_or(defaults.author),
        }
    }
}

impl From<PostMetadata> for MetadataJson {
    fn from(metadata: PostMetadata) -> Self {
        Self {
            read_time: metadata.read_time,
            views: metadata.views,
            author: Some(metadata.author),
        }
    }
}

/// Conversion from SeaORM Model to Domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            featured_image: model.featured_image,
            tags: model.tags,
            published: model.published,
            metadata: model.metadata.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain BlogPost to SeaORM ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            featured_image: Set(post.featured_image),
            tags: Set(post.tags),
            published: Set(post.published),
            metadata: Set(post.metadata.into()),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
