use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Clock used by the post lock while it waits for a holder to finish.
#[async_trait]
pub trait TimeService: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}
