use crate::domain::errors::DomainResult;
use crate::domain::finders::PostVisibilityFinder;
use crate::domain::ports::post_repository::PostRepository;
use std::sync::Arc;

/// Is a post currently deleted?
///
/// Answers by re-querying the deleted scope instead of trusting an in-memory
/// `Post`, so a concurrent transition is observed at decision time. A post
/// that does not exist is simply not satisfied.
#[derive(Clone)]
pub struct DeletionSpecification {
    post_repo: Arc<dyn PostRepository>,
}

impl DeletionSpecification {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    pub async fn is_satisfied_by(&self, post_id: &str) -> DomainResult<bool> {
        let finder = PostVisibilityFinder::new().deleted().with_id(post_id);
        Ok(self.post_repo.count_posts(&finder).await? > 0)
    }
}
