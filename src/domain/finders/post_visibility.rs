//! Query scope over posts, partitioned by the soft-delete flag.
//!
//! Every reader of posts (listings, counters, the deletion specification)
//! builds its query through [`PostVisibilityFinder`], so the active/deleted
//! partition is rendered in exactly one place: [`deletion_condition`].

use crate::domain::entities::PostStatus;
use sqlx::{Any, QueryBuilder};

/// Columns selected for a full `Post` row, aliased on `posts p`.
pub const POST_COLUMNS: &str =
    "p.id, p.author_id, p.title, p.body, p.status, p.is_deleted, p.created_at, p.updated_at";

/// SQL predicate selecting one side of the deletion partition on `posts p`.
pub fn deletion_condition(deleted: bool) -> &'static str {
    if deleted {
        "p.is_deleted = 1"
    } else {
        "p.is_deleted = 0"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostVisibilityFinder {
    status: Option<PostStatus>,
    author_id: Option<String>,
    post_id: Option<String>,
    deleted: bool,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl PostVisibilityFinder {
    /// Active scope, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the deleted scope. There is no mode that returns both.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn with_status(mut self, status: Option<PostStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn by_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    pub fn with_id(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn is_deleted_scope(&self) -> bool {
        self.deleted
    }

    /// Push `FROM posts p WHERE ...` with every filter of this scope.
    pub fn push_scope(&self, builder: &mut QueryBuilder<'_, Any>) {
        builder.push(" FROM posts p WHERE ");
        let mut conditions = builder.separated(" AND ");

        if let Some(status) = self.status {
            conditions.push("p.status = ");
            conditions.push_bind_unseparated(status.to_string());
        }

        if let Some(author_id) = &self.author_id {
            conditions.push("p.author_id = ");
            conditions.push_bind_unseparated(author_id.clone());
        }

        if let Some(post_id) = &self.post_id {
            conditions.push("p.id = ");
            conditions.push_bind_unseparated(post_id.clone());
        }

        conditions.push(deletion_condition(self.deleted));
    }

    /// Push ordering and pagination; only meaningful for row queries.
    pub fn push_ordering(&self, builder: &mut QueryBuilder<'_, Any>) {
        builder.push(" ORDER BY p.created_at DESC, p.id DESC");

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
            builder.push(" OFFSET ");
            builder.push_bind(self.offset.unwrap_or(0));
        }
    }
}
