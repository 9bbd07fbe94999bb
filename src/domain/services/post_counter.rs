use crate::domain::errors::DomainResult;
use crate::domain::finders::PostVisibilityFinder;
use crate::domain::ports::post_repository::PostRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct PostCounter {
    post_repo: Arc<dyn PostRepository>,
}

impl PostCounter {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    pub async fn deleted_posts_count(&self) -> DomainResult<i64> {
        self.post_repo
            .count_posts(&PostVisibilityFinder::new().deleted())
            .await
    }

    pub async fn active_posts_count(&self) -> DomainResult<i64> {
        self.post_repo.count_posts(&PostVisibilityFinder::new()).await
    }
}
