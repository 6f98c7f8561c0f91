//! PostgreSQL content store.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionTrait,
};

use folio_core::domain::{BlogPost, BlogPostPatch, Comment, NewBlogPost, NewComment, PostFilter};
use folio_core::error::RepoError;
use folio_core::ports::{BlogPostRepository, CommentRepository};

use super::entity::blog_post::{self, Entity as PostEntity};
use super::entity::comment::{self, Entity as CommentEntity};

/// Content store backed by the `blog_posts` and `comments` tables.
pub struct PostgresContentStore {
    pub(crate) db: DbConn,
}

impl PostgresContentStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// First post by slug (oldest wins), then by id, row-locked for the
    /// rest of `txn`.
    async fn lock_by_slug_or_id<C>(txn: &C, key: &str) -> Result<Option<blog_post::Model>, DbErr>
    where
        C: sea_orm::ConnectionTrait,
    {
        let by_slug = PostEntity::find()
            .filter(blog_post::Column::Slug.eq(key))
            .order_by_asc(blog_post::Column::CreatedAt)
            .lock_exclusive()
            .one(txn)
            .await?;

        match by_slug {
            Some(model) => Ok(Some(model)),
            None => PostEntity::find_by_id(key).lock_exclusive().one(txn).await,
        }
    }
}

fn db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::Type(_) | DbErr::Json(_) => RepoError::Corrupt(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// `%query%` with LIKE wildcards in `query` escaped.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl BlogPostRepository for PostgresContentStore {
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<BlogPost>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(published) = filter.published {
            query = query.filter(blog_post::Column::Published.eq(published));
        }

        let rows = query
            .order_by_desc(blog_post::Column::CreatedAt)
            .offset(filter.offset.map(|o| o as u64))
            .limit(filter.limit.map(|l| l as u64))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        let row = PostEntity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .order_by_asc(blog_post::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    async fn create_post(&self, input: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::new(input);
        tracing::debug!(post_id = %post.id, slug = %post.slug, "Inserting blog post");

        let row = blog_post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.into())
    }

    async fn update_post(
        &self,
        id: &str,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(row) = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            txn.commit().await.map_err(db_err)?;
            return Ok(None);
        };

        let mut post = BlogPost::from(row);
        post.apply(patch);

        let saved = blog_post::ActiveModel::from(post)
            .update(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(Some(saved.into()))
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<BlogPost>, RepoError> {
        let pattern = like_pattern(query);

        let rows = PostEntity::find()
            .filter(Expr::cust_with_values(
                "(title ILIKE ? OR content ILIKE ? \
                 OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ?))",
                [pattern.clone(), pattern.clone(), pattern],
            ))
            .order_by_asc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn fetch_and_record_view(
        &self,
        slug_or_id: &str,
    ) -> Result<Option<BlogPost>, RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(row) = Self::lock_by_slug_or_id(&txn, slug_or_id)
            .await
            .map_err(db_err)?
        else {
            txn.commit().await.map_err(db_err)?;
            return Ok(None);
        };

        let mut post = BlogPost::from(row);
        post.record_view();

        let saved = blog_post::ActiveModel::from(post)
            .update(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(Some(saved.into()))
    }
}

#[async_trait]
impl CommentRepository for PostgresContentStore {
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, RepoError> {
        let row = comment::ActiveModel::from(Comment::new(input))
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entity::blog_post::MetadataJson;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_row(id: &str, slug: &str, views: u64) -> blog_post::Model {
        let now = Utc::now();
        blog_post::Model {
            id: id.to_owned(),
            title: "Test Post".to_owned(),
            slug: slug.to_owned(),
            content: "Content".to_owned(),
            excerpt: None,
            featured_image: None,
            tags: vec!["rust".to_owned()],
            published: true,
            metadata: MetadataJson {
                read_time: 1,
                views,
                author: None,
            },
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
    }

    #[tokio::test]
    async fn test_get_post_maps_metadata_defaults() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_row("p1", "test-post", 3)]])
            .into_connection();
        let store = PostgresContentStore::new(db);

        let post = store.get_post("p1").await.unwrap().unwrap();

        assert_eq!(post.title, "Test Post");
        assert_eq!(post.metadata.views, 3);
        assert_eq!(post.metadata.author, folio_core::domain::DEFAULT_AUTHOR);
    }

    #[tokio::test]
    async fn test_list_posts_applies_filter_and_paging() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_row("p1", "a", 0), post_row("p2", "b", 0)]])
            .into_connection();
        let store = PostgresContentStore::new(db);

        let posts = store
            .list_posts(PostFilter {
                published: Some(true),
                limit: Some(2),
                offset: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(log.contains("ORDER BY"));
        assert!(log.contains("LIMIT"));
        assert!(log.contains("OFFSET"));
    }

    #[tokio::test]
    async fn test_record_view_falls_back_to_id_under_lock() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<blog_post::Model>::new(),
                vec![post_row("p1", "slug", 8_675_309)],
                vec![post_row("p1", "slug", 8_675_310)],
            ])
            .into_connection();
        let store = PostgresContentStore::new(db);

        let post = store.fetch_and_record_view("p1").await.unwrap().unwrap();
        assert_eq!(post.metadata.views, 8_675_310);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(log.contains("FOR UPDATE"));
        assert!(log.contains("8675310"));
    }

    #[tokio::test]
    async fn test_record_view_unknown_key() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<blog_post::Model>::new(),
                Vec::<blog_post::Model>::new(),
            ])
            .into_connection();
        let store = PostgresContentStore::new(db);

        assert!(store.fetch_and_record_view("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let store = PostgresContentStore::new(db);

        assert!(store.delete_post("p1").await.unwrap());
        assert!(!store.delete_post("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_escapes_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_row("p1", "a", 0)]])
            .into_connection();
        let store = PostgresContentStore::new(db);

        let hits = store.search_posts("50%").await.unwrap();
        assert_eq!(hits.len(), 1);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(log.contains("ILIKE"));
        assert!(log.contains("unnest(tags)"));
    }

    #[tokio::test]
    async fn test_create_comment_round_trips_row() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![comment::Model {
                id: "c1".to_owned(),
                post_id: "orphan".to_owned(),
                author: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                content: "Nice".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();
        let store = PostgresContentStore::new(db);

        let created = store
            .create_comment(NewComment {
                post_id: "orphan".to_owned(),
                author: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                content: "Nice".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(created.post_id, "orphan");
        assert_eq!(created.author, "Ada");
    }
}
