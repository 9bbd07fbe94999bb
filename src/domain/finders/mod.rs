pub mod comment_visibility;
pub mod post_visibility;

pub use comment_visibility::CommentVisibilityFinder;
pub use post_visibility::PostVisibilityFinder;
