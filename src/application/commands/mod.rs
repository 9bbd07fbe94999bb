pub mod delete_post;
pub mod restore_post;

pub use delete_post::DeletePost;
pub use restore_post::RestorePost;
