use crate::application::commands::{DeletePost, RestorePost};
use crate::application::services::{CommentService, PostService, ReminderService};
use crate::config::Config;
use crate::domain::ports::comment_repository::CommentRepository;
use crate::domain::ports::distributed_lock::DistributedLock;
use crate::domain::ports::post_event_log::PostEventLog;
use crate::domain::ports::post_repository::PostRepository;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use crate::domain::services::{
    DeletionSpecification, PostCounter, PostDeleterService, PostLock, PostLockSettings,
    PostRestorerService,
};
use crate::infrastructure::events::NullPostEventLog;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::{Database, DatabaseDistributedLock};
use crate::infrastructure::runtime::tokio::{TokioTaskSpawner, TokioTimeService};
use std::sync::Arc;

/// Wire the post lifecycle services over a database.
pub fn build_post_service(
    db: &Database,
    event_log: Arc<dyn PostEventLog>,
    lock_settings: PostLockSettings,
) -> PostService {
    let post_repo = Arc::new(db.clone()) as Arc<dyn PostRepository>;
    let lock = PostLock::new(
        Arc::new(DatabaseDistributedLock::new(db.clone())) as Arc<dyn DistributedLock>,
        Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>,
        Arc::new(TokioTaskSpawner::new()) as Arc<dyn TaskSpawner>,
        lock_settings,
    );
    let specification = DeletionSpecification::new(post_repo.clone());

    let delete_post = DeletePost::new(
        post_repo.clone(),
        specification.clone(),
        lock.clone(),
        PostDeleterService::new(post_repo.clone(), event_log.clone()),
    );
    let restore_post = RestorePost::new(
        post_repo.clone(),
        specification,
        lock,
        PostRestorerService::new(post_repo.clone(), event_log),
    );

    PostService::new(
        post_repo.clone(),
        delete_post,
        restore_post,
        PostCounter::new(post_repo),
    )
}

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    // No audit log is persisted yet; transitions are only traced.
    let event_log = Arc::new(NullPostEventLog) as Arc<dyn PostEventLog>;
    tracing::info!("Post event log: null implementation");

    let post_service = build_post_service(&db, event_log, config.post_lock_settings());

    let comment_repo = Arc::new(db.clone()) as Arc<dyn CommentRepository>;
    let comment_service = CommentService::new(
        comment_repo.clone(),
        Arc::new(db.clone()) as Arc<dyn PostRepository>,
    );
    let reminder_service = ReminderService::new(
        comment_repo,
        chrono::Duration::hours(config.reminder_after_hours),
    );

    AppState {
        post_service,
        comment_service,
        reminder_service,
    }
}
