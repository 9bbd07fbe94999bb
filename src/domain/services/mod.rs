pub mod deletion_specification;
pub mod post_counter;
pub mod post_lock;
pub mod post_transitions;

pub use deletion_specification::DeletionSpecification;
pub use post_counter::PostCounter;
pub use post_lock::{LockedPost, PostLock, PostLockSettings};
pub use post_transitions::{PostDeleterService, PostRestorerService};
