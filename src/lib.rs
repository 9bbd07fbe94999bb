pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::commands::{DeletePost, RestorePost};
pub use application::services::{CommentService, PostService, ReminderService};
pub use config::*;
pub use domain::entities::*;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::events::PostEvent;
pub use domain::finders::{CommentVisibilityFinder, PostVisibilityFinder};
pub use infrastructure::events::{BroadcastPostEventLog, NullPostEventLog};
pub use infrastructure::persistence::Database;
