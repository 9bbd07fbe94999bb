use crate::domain::entities::{Comment, Post};
use crate::domain::errors::DomainResult;
use crate::domain::finders::CommentVisibilityFinder;
use async_trait::async_trait;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> DomainResult<()>;

    async fn find_comments(&self, finder: &CommentVisibilityFinder) -> DomainResult<Vec<Comment>>;

    async fn count_comments(&self, finder: &CommentVisibilityFinder) -> DomainResult<i64>;

    /// Distinct posts reached through the comment scope, newest post first.
    async fn find_commented_posts(&self, finder: &CommentVisibilityFinder)
        -> DomainResult<Vec<Post>>;

    /// Stamps `reminder_sent_at` unless already set. Returns whether this call
    /// stamped it.
    async fn mark_reminder_sent(&self, comment_id: &str, sent_at: &str) -> DomainResult<bool>;

    /// Atomically stamps every unstamped comment in `finder`'s scope and
    /// returns exactly those, oldest first.
    async fn claim_reminders(
        &self,
        finder: &CommentVisibilityFinder,
        sent_at: &str,
    ) -> DomainResult<Vec<Comment>>;
}
