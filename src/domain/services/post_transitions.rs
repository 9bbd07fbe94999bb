use crate::domain::errors::DomainResult;
use crate::domain::events::PostEvent;
use crate::domain::ports::post_event_log::PostEventLog;
use crate::domain::ports::post_repository::PostRepository;
use crate::domain::services::post_lock::LockedPost;
use std::sync::Arc;

/// Marks a locked post as deleted. Does not re-validate state; the
/// calling command owns the precondition.
#[derive(Clone)]
pub struct PostDeleterService {
    post_repo: Arc<dyn PostRepository>,
    event_log: Arc<dyn PostEventLog>,
}

impl PostDeleterService {
    pub fn new(post_repo: Arc<dyn PostRepository>, event_log: Arc<dyn PostEventLog>) -> Self {
        Self {
            post_repo,
            event_log,
        }
    }

    pub async fn perform(&self, post: &LockedPost) -> DomainResult<()> {
        self.post_repo.set_post_deleted(post.post_id(), true).await?;
        tracing::info!("Post {} marked as deleted", post.post_id());

        self.event_log.record(PostEvent::PostDeleted {
            post_id: post.post_id().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Clears the deletion flag of a locked post.
#[derive(Clone)]
pub struct PostRestorerService {
    post_repo: Arc<dyn PostRepository>,
    event_log: Arc<dyn PostEventLog>,
}

impl PostRestorerService {
    pub fn new(post_repo: Arc<dyn PostRepository>, event_log: Arc<dyn PostEventLog>) -> Self {
        Self {
            post_repo,
            event_log,
        }
    }

    pub async fn perform(&self, post: &LockedPost) -> DomainResult<()> {
        self.post_repo.set_post_deleted(post.post_id(), false).await?;
        tracing::info!("Post {} restored", post.post_id());

        self.event_log.record(PostEvent::PostRestored {
            post_id: post.post_id().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}
