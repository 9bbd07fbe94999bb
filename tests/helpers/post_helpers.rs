#![allow(dead_code)]
use postdesk::bootstrap::build_post_service;
use postdesk::domain::errors::DomainResult;
use postdesk::domain::ports::comment_repository::CommentRepository;
use postdesk::domain::ports::post_event_log::PostEventLog;
use postdesk::domain::ports::post_repository::PostRepository;
use postdesk::domain::services::PostLockSettings;
use postdesk::{
    Comment, CommentService, CommentType, Database, Post, PostEvent, PostService, PostStatus,
    ReminderService,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Event log that keeps every recorded event for assertions.
#[derive(Default)]
pub struct RecordingEventLog {
    events: Mutex<Vec<PostEvent>>,
}

impl RecordingEventLog {
    pub fn events(&self) -> Vec<PostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }
}

impl PostEventLog for RecordingEventLog {
    fn record(&self, event: PostEvent) -> DomainResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub fn fast_lock_settings() -> PostLockSettings {
    PostLockSettings {
        ttl_seconds: 30,
        wait: Duration::from_secs(5),
        poll_interval: Duration::from_millis(5),
    }
}

pub struct Services {
    pub posts: PostService,
    pub comments: CommentService,
    pub reminders: ReminderService,
    pub events: Arc<RecordingEventLog>,
}

pub fn build_services(db: &Database) -> Services {
    build_services_with_lock(db, fast_lock_settings())
}

pub fn build_services_with_lock(db: &Database, lock_settings: PostLockSettings) -> Services {
    let events = Arc::new(RecordingEventLog::default());
    let posts = build_post_service(db, events.clone(), lock_settings);

    let comment_repo = Arc::new(db.clone()) as Arc<dyn CommentRepository>;
    let comments = CommentService::new(
        comment_repo.clone(),
        Arc::new(db.clone()) as Arc<dyn PostRepository>,
    );
    let reminders = ReminderService::new(comment_repo, chrono::Duration::hours(48));

    Services {
        posts,
        comments,
        reminders,
        events,
    }
}

/// Insert a post directly, bypassing the service layer.
pub async fn create_test_post(db: &Database, title: &str) -> Post {
    create_test_post_with(db, title, PostStatus::Published, false).await
}

pub async fn create_test_post_with(
    db: &Database,
    title: &str,
    status: PostStatus,
    is_deleted: bool,
) -> Post {
    let mut post = Post::new(
        "author-1".to_string(),
        title.to_string(),
        format!("Body of {}", title),
        status,
    );
    post.is_deleted = is_deleted;
    db.create_post(&post).await.expect("Failed to create post");
    post
}

/// Insert a comment with an explicit creation timestamp.
pub async fn create_test_comment_at(
    db: &Database,
    post_id: &str,
    commentator_id: &str,
    comment_type: CommentType,
    created_at: &str,
) -> Comment {
    let mut comment = Comment::new(
        post_id.to_string(),
        commentator_id.to_string(),
        comment_type,
        "Is this still accurate?".to_string(),
    );
    comment.created_at = created_at.to_string();
    db.create_comment(&comment)
        .await
        .expect("Failed to create comment");
    comment
}

pub async fn is_deleted_in_db(db: &Database, post_id: &str) -> bool {
    db.get_post_by_id(post_id)
        .await
        .expect("Failed to load post")
        .expect("Post missing")
        .is_deleted
}

pub fn ids(posts: &[Post]) -> Vec<String> {
    posts.iter().map(|p| p.id.clone()).collect()
}
