use crate::domain::errors::DomainResult;
use crate::domain::events::PostEvent;

/// Hook invoked once after every committed delete or restore.
pub trait PostEventLog: Send + Sync {
    fn record(&self, event: PostEvent) -> DomainResult<()>;
}
