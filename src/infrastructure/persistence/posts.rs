use crate::domain::entities::{Post, PostStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::finders::post_visibility::POST_COLUMNS;
use crate::domain::finders::PostVisibilityFinder;
use crate::domain::ports::post_repository::PostRepository;
use crate::infrastructure::persistence::{flag, Database};
use async_trait::async_trait;
use sqlx::{any::AnyRow, Any, QueryBuilder, Row};

pub(crate) fn post_from_row(row: &AnyRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        author_id: row.try_get("author_id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        status: PostStatus::from(row.try_get::<String, _>("status")?),
        is_deleted: flag(row.try_get("is_deleted")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PostRepository for Database {
    async fn create_post(&self, post: &Post) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO posts (id, author_id, title, body, status, is_deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.id)
        .bind(&post.author_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.status.to_string())
        .bind(post.is_deleted as i64)
        .bind(&post.created_at)
        .bind(&post.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!("Post created: id={}, author={}", post.id, post.author_id);
        Ok(())
    }

    async fn get_post_by_id(&self, post_id: &str) -> DomainResult<Option<Post>> {
        let row = sqlx::query(&format!("SELECT {} FROM posts p WHERE p.id = ?", POST_COLUMNS))
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(post_from_row).transpose()?)
    }

    async fn find_posts(&self, finder: &PostVisibilityFinder) -> DomainResult<Vec<Post>> {
        let mut builder = QueryBuilder::<Any>::new(format!("SELECT {}", POST_COLUMNS));
        finder.push_scope(&mut builder);
        finder.push_ordering(&mut builder);

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            posts.push(post_from_row(row)?);
        }
        Ok(posts)
    }

    async fn count_posts(&self, finder: &PostVisibilityFinder) -> DomainResult<i64> {
        let mut builder = QueryBuilder::<Any>::new("SELECT COUNT(*) AS count");
        finder.push_scope(&mut builder);

        let row = builder.build().fetch_one(&self.pool).await?;
        Ok(row.try_get("count")?)
    }

    async fn set_post_deleted(&self, post_id: &str, is_deleted: bool) -> DomainResult<()> {
        let result = sqlx::query("UPDATE posts SET is_deleted = ?, updated_at = ? WHERE id = ?")
            .bind(is_deleted as i64)
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Post {} not found", post_id)));
        }

        Ok(())
    }
}
