use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::distributed_lock::DistributedLock;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Proof that the exclusive lock for `post_id` is held.
///
/// Only [`PostLock::with_lock`] constructs one, so services taking a
/// `&LockedPost` cannot be called outside the critical section.
#[derive(Debug)]
pub struct LockedPost {
    post_id: String,
    owner: String,
}

impl LockedPost {
    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PostLockSettings {
    /// Expiry of a held lock, so a crashed holder cannot wedge a post.
    pub ttl_seconds: u64,
    /// How long to wait for the current holder before giving up.
    pub wait: Duration,
    pub poll_interval: Duration,
}

impl Default for PostLockSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: 30,
            wait: Duration::from_secs(5),
            poll_interval: Duration::from_millis(25),
        }
    }
}

/// Exclusive lock scoped to a single post.
#[derive(Clone)]
pub struct PostLock {
    lock: Arc<dyn DistributedLock>,
    time: Arc<dyn TimeService>,
    spawner: Arc<dyn TaskSpawner>,
    settings: PostLockSettings,
}

impl PostLock {
    pub fn new(
        lock: Arc<dyn DistributedLock>,
        time: Arc<dyn TimeService>,
        spawner: Arc<dyn TaskSpawner>,
        settings: PostLockSettings,
    ) -> Self {
        Self {
            lock,
            time,
            spawner,
            settings,
        }
    }

    pub fn key_for(post_id: &str) -> String {
        format!("post:{}", post_id)
    }

    /// Run `critical` while holding the lock for `post_id`, waiting for any
    /// current holder first. The lock is released on every exit path of
    /// `critical`, including the returned future being dropped mid-way.
    pub async fn with_lock<F, Fut, T>(&self, post_id: &str, critical: F) -> DomainResult<T>
    where
        F: FnOnce(LockedPost) -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let key = Self::key_for(post_id);
        let owner = uuid::Uuid::new_v4().to_string();

        // Armed before acquiring: a dropped acquire may already hold the row.
        let mut guard = ReleaseOnDrop {
            lock: self.lock.clone(),
            spawner: self.spawner.clone(),
            key: key.clone(),
            owner: owner.clone(),
            armed: true,
        };

        if let Err(e) = self.acquire(&key, &owner).await {
            guard.disarm();
            return Err(e);
        }
        tracing::debug!("Acquired post lock {} (owner {})", key, owner);

        let result = critical(LockedPost {
            post_id: post_id.to_string(),
            owner: owner.clone(),
        })
        .await;

        if let Err(e) = self.lock.release(&key, &owner).await {
            // The row expires after ttl_seconds; the outcome of `critical` stands.
            tracing::error!("Failed to release post lock {}: {}", key, e);
        } else {
            tracing::debug!("Released post lock {}", key);
        }
        guard.disarm();

        result
    }

    async fn acquire(&self, key: &str, owner: &str) -> DomainResult<()> {
        let deadline = self.time.now() + self.settings.wait;

        loop {
            if self
                .lock
                .acquire(key, owner, self.settings.ttl_seconds)
                .await?
            {
                return Ok(());
            }

            if self.time.now() >= deadline {
                tracing::warn!(
                    "Timed out after {:?} waiting for post lock {}",
                    self.settings.wait,
                    key
                );
                metrics::counter!("post_lock_timeouts_total").increment(1);
                return Err(DomainError::LockTimeout(format!(
                    "Could not acquire lock {} within {:?}",
                    key, self.settings.wait
                )));
            }

            self.time.sleep(self.settings.poll_interval).await;
        }
    }
}

/// Releases the lock from a background task when `with_lock` is dropped
/// before it reaches its own release.
struct ReleaseOnDrop {
    lock: Arc<dyn DistributedLock>,
    spawner: Arc<dyn TaskSpawner>,
    key: String,
    owner: String,
    armed: bool,
}

impl ReleaseOnDrop {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::warn!("Post lock {} abandoned by a cancelled caller; releasing", self.key);
        let lock = self.lock.clone();
        let key = std::mem::take(&mut self.key);
        let owner = std::mem::take(&mut self.owner);
        self.spawner.spawn(Box::pin(async move {
            if let Err(e) = lock.release(&key, &owner).await {
                tracing::error!("Failed to release abandoned post lock {}: {}", key, e);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct MemoryLock {
        held: Mutex<HashMap<String, String>>,
        releases: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DistributedLock for MemoryLock {
        async fn acquire(&self, key: &str, owner: &str, _ttl_seconds: u64) -> DomainResult<bool> {
            let mut held = self.held.lock().unwrap();
            if held.contains_key(key) {
                return Ok(false);
            }
            held.insert(key.to_string(), owner.to_string());
            Ok(true)
        }

        async fn release(&self, key: &str, owner: &str) -> DomainResult<()> {
            let mut held = self.held.lock().unwrap();
            if held.get(key).map(String::as_str) == Some(owner) {
                held.remove(key);
            }
            self.releases.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    /// Clock that advances only when slept on.
    struct ManualClock {
        start: Instant,
        elapsed: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                elapsed: Mutex::new(Duration::ZERO),
            }
        }
    }

    #[async_trait]
    impl TimeService for ManualClock {
        fn now(&self) -> Instant {
            self.start + *self.elapsed.lock().unwrap()
        }

        async fn sleep(&self, duration: Duration) {
            *self.elapsed.lock().unwrap() += duration;
        }
    }

    /// Holds spawned futures until the test runs them.
    #[derive(Default)]
    struct DeferredSpawner {
        pending: Mutex<Vec<BoxFuture<'static, ()>>>,
    }

    impl DeferredSpawner {
        fn len(&self) -> usize {
            self.pending.lock().unwrap().len()
        }

        async fn run_all(&self) {
            let pending = std::mem::take(&mut *self.pending.lock().unwrap());
            for future in pending {
                future.await;
            }
        }
    }

    impl TaskSpawner for DeferredSpawner {
        fn spawn(&self, future: BoxFuture<'static, ()>) {
            self.pending.lock().unwrap().push(future);
        }
    }

    fn post_lock(lock: Arc<MemoryLock>) -> PostLock {
        post_lock_with(lock, Arc::new(DeferredSpawner::default()))
    }

    fn post_lock_with(lock: Arc<MemoryLock>, spawner: Arc<DeferredSpawner>) -> PostLock {
        PostLock::new(
            lock,
            Arc::new(ManualClock::new()),
            spawner,
            PostLockSettings {
                ttl_seconds: 30,
                wait: Duration::from_millis(100),
                poll_interval: Duration::from_millis(10),
            },
        )
    }

    #[tokio::test]
    async fn test_runs_critical_section_and_releases() {
        let lock = Arc::new(MemoryLock::default());
        let post_lock = post_lock(lock.clone());

        let seen = post_lock
            .with_lock("p1", |locked| async move { Ok(locked.post_id().to_string()) })
            .await
            .unwrap();

        assert_eq!(seen, "p1");
        assert!(lock.held.lock().unwrap().is_empty());
        assert_eq!(*lock.releases.lock().unwrap(), vec!["post:p1".to_string()]);
    }

    #[tokio::test]
    async fn test_releases_when_critical_section_fails() {
        let lock = Arc::new(MemoryLock::default());
        let post_lock = post_lock(lock.clone());

        let result: DomainResult<()> = post_lock
            .with_lock("p1", |_| async {
                Err(DomainError::PreconditionViolation("already deleted".to_string()))
            })
            .await;

        assert!(result.unwrap_err().is_precondition_violation());
        assert!(lock.held.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_times_out_while_another_owner_holds_the_post() {
        let lock = Arc::new(MemoryLock::default());
        lock.held
            .lock()
            .unwrap()
            .insert("post:p1".to_string(), "someone-else".to_string());
        let post_lock = post_lock(lock.clone());

        let result = post_lock.with_lock("p1", |_| async { Ok(()) }).await;

        assert!(matches!(result, Err(DomainError::LockTimeout(_))));
        assert!(lock.releases.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locks_on_different_posts_are_independent() {
        let lock = Arc::new(MemoryLock::default());
        lock.held
            .lock()
            .unwrap()
            .insert("post:p1".to_string(), "someone-else".to_string());
        let post_lock = post_lock(lock);

        assert!(post_lock.with_lock("p2", |_| async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_caller_releases_in_background() {
        let lock = Arc::new(MemoryLock::default());
        let spawner = Arc::new(DeferredSpawner::default());
        let post_lock = post_lock_with(lock.clone(), spawner.clone());

        let cancelled = tokio::time::timeout(
            Duration::from_millis(20),
            post_lock.with_lock("p1", |_| futures::future::pending::<DomainResult<()>>()),
        )
        .await;
        assert!(cancelled.is_err());

        assert!(lock.held.lock().unwrap().contains_key("post:p1"));
        assert_eq!(spawner.len(), 1);

        spawner.run_all().await;
        assert!(lock.held.lock().unwrap().is_empty());
        assert!(post_lock.with_lock("p1", |_| async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_completed_or_timed_out_callers_spawn_nothing() {
        let lock = Arc::new(MemoryLock::default());
        let spawner = Arc::new(DeferredSpawner::default());
        let post_lock = post_lock_with(lock.clone(), spawner.clone());

        post_lock.with_lock("p1", |_| async { Ok(()) }).await.unwrap();

        lock.held
            .lock()
            .unwrap()
            .insert("post:p2".to_string(), "someone-else".to_string());
        let timed_out = post_lock.with_lock("p2", |_| async { Ok(()) }).await;
        assert!(matches!(timed_out, Err(DomainError::LockTimeout(_))));

        assert_eq!(spawner.len(), 0);
    }
}
