pub mod error;

pub use error::{ApiError, ApiResult};

use crate::application::services::{CommentService, PostService, ReminderService};

#[derive(Clone)]
pub struct AppState {
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub reminder_service: ReminderService,
}
