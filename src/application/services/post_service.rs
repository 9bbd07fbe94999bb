use crate::application::commands::{DeletePost, RestorePost};
use crate::domain::entities::{CreatePostRequest, Post, PostStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::finders::PostVisibilityFinder;
use crate::domain::ports::post_repository::PostRepository;
use crate::domain::services::PostCounter;
use std::sync::Arc;

/// Entry point for callers outside the core: listings, transitions, counts.
///
/// Authorization is the caller's responsibility.
#[derive(Clone)]
pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
    delete_post: DeletePost,
    restore_post: RestorePost,
    counter: PostCounter,
}

impl PostService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        delete_post: DeletePost,
        restore_post: RestorePost,
        counter: PostCounter,
    ) -> Self {
        Self {
            post_repo,
            delete_post,
            restore_post,
            counter,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn create_post(&self, request: CreatePostRequest) -> DomainResult<Post> {
        request.validate().map_err(DomainError::ValidationError)?;

        let post = Post::new(
            request.author_id,
            request.title,
            request.body,
            request.status.unwrap_or(PostStatus::Draft),
        );
        self.post_repo.create_post(&post).await?;

        Ok(post)
    }

    /// Default scope for every end-user listing.
    pub async fn list_active_posts(&self, status: Option<PostStatus>) -> DomainResult<Vec<Post>> {
        self.post_repo
            .find_posts(&PostVisibilityFinder::new().with_status(status))
            .await
    }

    pub async fn list_deleted_posts(&self) -> DomainResult<Vec<Post>> {
        self.post_repo
            .find_posts(&PostVisibilityFinder::new().deleted())
            .await
    }

    /// Run a caller-built scope, e.g. a paginated or per-author listing.
    pub async fn find_posts(&self, finder: &PostVisibilityFinder) -> DomainResult<Vec<Post>> {
        self.post_repo.find_posts(finder).await
    }

    pub async fn delete_post(&self, post_id: &str) -> DomainResult<()> {
        self.delete_post.execute(post_id).await
    }

    pub async fn restore_post(&self, post_id: &str) -> DomainResult<()> {
        self.restore_post.execute(post_id).await
    }

    pub async fn count_deleted_posts(&self) -> DomainResult<i64> {
        self.counter.deleted_posts_count().await
    }

    pub async fn count_active_posts(&self) -> DomainResult<i64> {
        self.counter.active_posts_count().await
    }

    pub fn delete_command(&self) -> &DeletePost {
        &self.delete_post
    }

    pub fn restore_command(&self) -> &RestorePost {
        &self.restore_post
    }
}
