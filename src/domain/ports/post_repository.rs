use crate::domain::entities::Post;
use crate::domain::errors::DomainResult;
use crate::domain::finders::PostVisibilityFinder;
use async_trait::async_trait;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: &Post) -> DomainResult<()>;

    /// Unscoped lookup, used only to tell a missing post apart from a
    /// post in the wrong visibility state.
    async fn get_post_by_id(&self, post_id: &str) -> DomainResult<Option<Post>>;

    async fn find_posts(&self, finder: &PostVisibilityFinder) -> DomainResult<Vec<Post>>;

    async fn count_posts(&self, finder: &PostVisibilityFinder) -> DomainResult<i64>;

    /// Write the soft-delete flag. Callers must hold the post lock.
    async fn set_post_deleted(&self, post_id: &str, is_deleted: bool) -> DomainResult<()>;
}
