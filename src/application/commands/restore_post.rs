use crate::application::commands::delete_post::record_outcome;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::post_repository::PostRepository;
use crate::domain::services::{DeletionSpecification, PostLock, PostRestorerService};
use std::sync::Arc;

/// Brings a soft-deleted post back into the active scope.
#[derive(Clone)]
pub struct RestorePost {
    post_repo: Arc<dyn PostRepository>,
    specification: DeletionSpecification,
    lock: PostLock,
    restorer: PostRestorerService,
}

impl RestorePost {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        specification: DeletionSpecification,
        lock: PostLock,
        restorer: PostRestorerService,
    ) -> Self {
        Self {
            post_repo,
            specification,
            lock,
            restorer,
        }
    }

    /// Only deleted posts can be restored.
    pub async fn callable(&self, post_id: &str) -> DomainResult<bool> {
        self.specification.is_satisfied_by(post_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, post_id: &str) -> DomainResult<()> {
        let result = self.transition(post_id).await;
        record_outcome("restore", &result);
        result
    }

    async fn transition(&self, post_id: &str) -> DomainResult<()> {
        if self.post_repo.get_post_by_id(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("Post {} not found", post_id)));
        }

        if !self.callable(post_id).await? {
            return Err(self.violation(post_id));
        }

        self.lock
            .with_lock(post_id, |locked| async move {
                if !self.callable(locked.post_id()).await? {
                    return Err(self.violation(locked.post_id()));
                }
                self.restorer.perform(&locked).await
            })
            .await
    }

    fn violation(&self, post_id: &str) -> DomainError {
        tracing::warn!("Rejected restore of post {}: not deleted", post_id);
        DomainError::PreconditionViolation(format!("Post {} is not deleted", post_id))
    }
}
