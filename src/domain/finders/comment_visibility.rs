//! Query scope over comments joined to their owning post.
//!
//! Comments of deleted posts are never part of this scope. The restriction is
//! unconditional and has no toggle.

use crate::domain::entities::CommentType;
use crate::domain::finders::post_visibility::deletion_condition;
use sqlx::{Any, QueryBuilder};

pub const COMMENT_COLUMNS: &str = "c.id, c.post_id, c.commentator_id, c.comment_type, c.body, \
     c.answered, c.reminder_sent_at, c.created_at";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentVisibilityFinder {
    comment_type: Option<CommentType>,
    commentator_id: Option<String>,
    post_id: Option<String>,
    reminder_due_before: Option<String>,
}

impl CommentVisibilityFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, comment_type: CommentType) -> Self {
        self.comment_type = Some(comment_type);
        self
    }

    pub fn by_commentator(mut self, commentator_id: impl Into<String>) -> Self {
        self.commentator_id = Some(commentator_id.into());
        self
    }

    pub fn on_post(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    /// Unanswered comments with no reminder sent, created before `cutoff` (RFC 3339).
    pub fn needing_reminder(mut self, cutoff: impl Into<String>) -> Self {
        self.reminder_due_before = Some(cutoff.into());
        self
    }

    /// Push `FROM comments c JOIN posts p ... WHERE ...` for this scope.
    pub fn push_scope(&self, builder: &mut QueryBuilder<'_, Any>) {
        builder.push(" FROM comments c INNER JOIN posts p ON p.id = c.post_id WHERE ");
        let mut conditions = builder.separated(" AND ");

        if let Some(comment_type) = self.comment_type {
            conditions.push("c.comment_type = ");
            conditions.push_bind_unseparated(comment_type.to_string());
        }

        if let Some(commentator_id) = &self.commentator_id {
            conditions.push("c.commentator_id = ");
            conditions.push_bind_unseparated(commentator_id.clone());
        }

        if let Some(post_id) = &self.post_id {
            conditions.push("c.post_id = ");
            conditions.push_bind_unseparated(post_id.clone());
        }

        if let Some(cutoff) = &self.reminder_due_before {
            conditions.push("c.answered = 0");
            conditions.push("c.reminder_sent_at IS NULL");
            conditions.push("c.created_at < ");
            conditions.push_bind_unseparated(cutoff.clone());
        }

        conditions.push(deletion_condition(false));
    }

    pub fn push_ordering(&self, builder: &mut QueryBuilder<'_, Any>) {
        builder.push(" ORDER BY c.created_at ASC, c.id ASC");
    }
}
