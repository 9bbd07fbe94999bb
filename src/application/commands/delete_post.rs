use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::post_repository::PostRepository;
use crate::domain::services::{DeletionSpecification, PostDeleterService, PostLock};
use std::sync::Arc;

/// Soft-deletes a post that is currently active.
#[derive(Clone)]
pub struct DeletePost {
    post_repo: Arc<dyn PostRepository>,
    specification: DeletionSpecification,
    lock: PostLock,
    deleter: PostDeleterService,
}

impl DeletePost {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        specification: DeletionSpecification,
        lock: PostLock,
        deleter: PostDeleterService,
    ) -> Self {
        Self {
            post_repo,
            specification,
            lock,
            deleter,
        }
    }

    /// A post can be deleted only while it is not already deleted.
    pub async fn callable(&self, post_id: &str) -> DomainResult<bool> {
        Ok(!self.specification.is_satisfied_by(post_id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, post_id: &str) -> DomainResult<()> {
        let result = self.transition(post_id).await;
        record_outcome("delete", &result);
        result
    }

    async fn transition(&self, post_id: &str) -> DomainResult<()> {
        if self.post_repo.get_post_by_id(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("Post {} not found", post_id)));
        }

        // Cheap rejection before queueing on the lock.
        if !self.callable(post_id).await? {
            return Err(self.violation(post_id));
        }

        self.lock
            .with_lock(post_id, |locked| async move {
                // Another caller may have won the race while we waited.
                if !self.callable(locked.post_id()).await? {
                    return Err(self.violation(locked.post_id()));
                }
                self.deleter.perform(&locked).await
            })
            .await
    }

    fn violation(&self, post_id: &str) -> DomainError {
        tracing::warn!("Rejected delete of post {}: already deleted", post_id);
        DomainError::PreconditionViolation(format!("Post {} is already deleted", post_id))
    }
}

pub(crate) fn record_outcome(action: &'static str, result: &DomainResult<()>) {
    metrics::counter!(
        "posts_transitions_total",
        "action" => action,
        "outcome" => outcome_label(result)
    )
    .increment(1);
}

fn outcome_label(result: &DomainResult<()>) -> &'static str {
    match result {
        Ok(()) => "success",
        Err(DomainError::NotFound(_)) => "not_found",
        Err(DomainError::PreconditionViolation(_)) => "precondition_violation",
        Err(DomainError::LockTimeout(_)) => "lock_timeout",
        Err(_) => "error",
    }
}
