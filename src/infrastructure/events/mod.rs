use crate::domain::errors::DomainResult;
use crate::domain::events::PostEvent;
use crate::domain::ports::post_event_log::PostEventLog;
use futures::Stream;
use std::pin::Pin;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Event log that drops every event. Used until an audit log is persisted.
#[derive(Debug, Clone, Default)]
pub struct NullPostEventLog;

impl PostEventLog for NullPostEventLog {
    fn record(&self, event: PostEvent) -> DomainResult<()> {
        tracing::trace!("Discarding {} event for post {}", event.name(), event.post_id());
        Ok(())
    }
}

/// In-process fan-out of post events over a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastPostEventLog {
    tx: broadcast::Sender<PostEvent>,
}

impl BroadcastPostEventLog {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(
        &self,
    ) -> Pin<Box<dyn Stream<Item = Result<PostEvent, BroadcastStreamRecvError>> + Send>> {
        Box::pin(BroadcastStream::new(self.tx.subscribe()))
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastPostEventLog {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl PostEventLog for BroadcastPostEventLog {
    fn record(&self, event: PostEvent) -> DomainResult<()> {
        // No subscribers is not an error for the transition.
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("No active subscribers for post event: {}", e);
        }
        Ok(())
    }
}
