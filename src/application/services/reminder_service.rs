use crate::domain::entities::{Comment, CommentType};
use crate::domain::errors::DomainResult;
use crate::domain::finders::CommentVisibilityFinder;
use crate::domain::ports::comment_repository::CommentRepository;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Finds unanswered questions that are due a reminder notification.
///
/// Delivery is handled by the notification pipeline; this service only
/// selects the comments and records that a reminder went out.
#[derive(Clone)]
pub struct ReminderService {
    comment_repo: Arc<dyn CommentRepository>,
    reminder_after: Duration,
}

impl ReminderService {
    pub fn new(comment_repo: Arc<dyn CommentRepository>, reminder_after: Duration) -> Self {
        Self {
            comment_repo,
            reminder_after,
        }
    }

    pub async fn comments_needing_reminder(&self) -> DomainResult<Vec<Comment>> {
        let cutoff = (Utc::now() - self.reminder_after).to_rfc3339();
        self.comments_needing_reminder_before(&cutoff).await
    }

    pub async fn comments_needing_reminder_before(&self, cutoff: &str) -> DomainResult<Vec<Comment>> {
        self.comment_repo.find_comments(&Self::due_before(cutoff)).await
    }

    /// Stamp and return every due reminder. Concurrent claims never return
    /// the same comment.
    #[tracing::instrument(skip(self))]
    pub async fn claim_due_reminders(&self) -> DomainResult<Vec<Comment>> {
        let now = Utc::now();
        let cutoff = (now - self.reminder_after).to_rfc3339();
        let claimed = self
            .comment_repo
            .claim_reminders(&Self::due_before(&cutoff), &now.to_rfc3339())
            .await?;

        tracing::info!("Claimed {} due reminders", claimed.len());
        Ok(claimed)
    }

    /// Stamp the given comments; returns how many were not stamped before.
    #[tracing::instrument(skip(self, comments), fields(count = comments.len()))]
    pub async fn mark_reminded(&self, comments: &[Comment]) -> DomainResult<usize> {
        let now = Utc::now().to_rfc3339();
        let mut stamped = 0;
        for comment in comments {
            if self.comment_repo.mark_reminder_sent(&comment.id, &now).await? {
                stamped += 1;
            }
        }
        Ok(stamped)
    }

    fn due_before(cutoff: &str) -> CommentVisibilityFinder {
        CommentVisibilityFinder::new()
            .of_type(CommentType::Question)
            .needing_reminder(cutoff)
    }
}
