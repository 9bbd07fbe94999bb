pub mod comment_service;
pub mod post_service;
pub mod reminder_service;

pub use comment_service::CommentService;
pub use post_service::PostService;
pub use reminder_service::ReminderService;
