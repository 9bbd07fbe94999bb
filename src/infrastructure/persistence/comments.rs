use crate::domain::entities::{Comment, CommentType, Post};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::finders::comment_visibility::COMMENT_COLUMNS;
use crate::domain::finders::post_visibility::POST_COLUMNS;
use crate::domain::finders::CommentVisibilityFinder;
use crate::domain::ports::comment_repository::CommentRepository;
use crate::infrastructure::persistence::posts::post_from_row;
use crate::infrastructure::persistence::{flag, Database};
use async_trait::async_trait;
use sqlx::{any::AnyRow, Any, QueryBuilder, Row};

fn comment_from_row(row: &AnyRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        commentator_id: row.try_get("commentator_id")?,
        comment_type: CommentType::from(row.try_get::<String, _>("comment_type")?),
        body: row.try_get("body")?,
        answered: flag(row.try_get("answered")?),
        // The Any driver rejects NULL for Option<String>; treat it as unset.
        reminder_sent_at: row
            .try_get::<Option<String>, _>("reminder_sent_at")
            .ok()
            .flatten(),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CommentRepository for Database {
    async fn create_comment(&self, comment: &Comment) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO comments (id, post_id, commentator_id, comment_type, body, answered, reminder_sent_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&comment.id)
        .bind(&comment.post_id)
        .bind(&comment.commentator_id)
        .bind(comment.comment_type.to_string())
        .bind(&comment.body)
        .bind(comment.answered as i64)
        .bind(&comment.reminder_sent_at)
        .bind(&comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comments(&self, finder: &CommentVisibilityFinder) -> DomainResult<Vec<Comment>> {
        let mut builder = QueryBuilder::<Any>::new(format!("SELECT {}", COMMENT_COLUMNS));
        finder.push_scope(&mut builder);
        finder.push_ordering(&mut builder);

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            comments.push(comment_from_row(row)?);
        }
        Ok(comments)
    }

    async fn count_comments(&self, finder: &CommentVisibilityFinder) -> DomainResult<i64> {
        let mut builder = QueryBuilder::<Any>::new("SELECT COUNT(*) AS count");
        finder.push_scope(&mut builder);

        let row = builder.build().fetch_one(&self.pool).await?;
        Ok(row.try_get("count")?)
    }

    async fn find_commented_posts(
        &self,
        finder: &CommentVisibilityFinder,
    ) -> DomainResult<Vec<Post>> {
        let mut builder = QueryBuilder::<Any>::new(format!("SELECT DISTINCT {}", POST_COLUMNS));
        finder.push_scope(&mut builder);
        builder.push(" ORDER BY p.created_at DESC, p.id DESC");

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            posts.push(post_from_row(row)?);
        }
        Ok(posts)
    }

    async fn mark_reminder_sent(&self, comment_id: &str, sent_at: &str) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE comments SET reminder_sent_at = ? WHERE id = ? AND reminder_sent_at IS NULL",
        )
        .bind(sent_at)
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        let exists = sqlx::query("SELECT id FROM comments WHERE id = ?")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;
        match exists {
            Some(_) => Ok(false),
            None => Err(DomainError::NotFound(format!(
                "Comment {} not found",
                comment_id
            ))),
        }
    }

    async fn claim_reminders(
        &self,
        finder: &CommentVisibilityFinder,
        sent_at: &str,
    ) -> DomainResult<Vec<Comment>> {
        // One statement: selection and stamp cannot interleave with another claim.
        let mut builder = QueryBuilder::<Any>::new("UPDATE comments SET reminder_sent_at = ");
        builder.push_bind(sent_at.to_string());
        builder.push(" WHERE reminder_sent_at IS NULL AND id IN (SELECT c.id");
        finder.push_scope(&mut builder);
        builder.push(
            ") RETURNING id, post_id, commentator_id, comment_type, body, answered, \
             reminder_sent_at, created_at",
        );

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            comments.push(comment_from_row(row)?);
        }
        // RETURNING order is unspecified.
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(comments)
    }
}
