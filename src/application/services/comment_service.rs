use crate::domain::entities::{Comment, CreateCommentRequest, Post};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::finders::{CommentVisibilityFinder, PostVisibilityFinder};
use crate::domain::ports::comment_repository::CommentRepository;
use crate::domain::ports::post_repository::PostRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    post_repo: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comment_repo: Arc<dyn CommentRepository>, post_repo: Arc<dyn PostRepository>) -> Self {
        Self {
            comment_repo,
            post_repo,
        }
    }

    /// Comment on a post. Deleted posts are indistinguishable from missing ones.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: &str,
        request: CreateCommentRequest,
    ) -> DomainResult<Comment> {
        request.validate().map_err(DomainError::ValidationError)?;

        let target = PostVisibilityFinder::new().with_id(post_id);
        if self.post_repo.count_posts(&target).await? == 0 {
            return Err(DomainError::NotFound(format!("Post {} not found", post_id)));
        }

        let comment = Comment::new(
            post_id.to_string(),
            request.commentator_id,
            request.comment_type,
            request.body,
        );
        self.comment_repo.create_comment(&comment).await?;

        tracing::info!("Comment {} created on post {}", comment.id, post_id);
        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: &str) -> DomainResult<Vec<Comment>> {
        self.comment_repo
            .find_comments(&CommentVisibilityFinder::new().on_post(post_id))
            .await
    }

    /// Posts an end user has commented on, excluding deleted posts.
    pub async fn commented_posts(&self, commentator_id: &str) -> DomainResult<Vec<Post>> {
        self.comment_repo
            .find_commented_posts(&CommentVisibilityFinder::new().by_commentator(commentator_id))
            .await
    }
}
