use futures::future::BoxFuture;

/// Spawns detached background work without tying the domain to a runtime.
pub trait TaskSpawner: Send + Sync {
    fn spawn(&self, future: BoxFuture<'static, ()>);
}
