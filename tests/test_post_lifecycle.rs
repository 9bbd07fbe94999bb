/// Soft-delete lifecycle: the deletion predicate and the guarded
/// delete/restore commands.
mod helpers;

use futures::StreamExt;
use helpers::*;
use postdesk::domain::ports::post_repository::PostRepository;
use postdesk::domain::services::DeletionSpecification;
use postdesk::{BroadcastPostEventLog, DomainError, PostEvent};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_specification_matches_flag() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let specification = DeletionSpecification::new(Arc::new(db.clone()) as Arc<dyn PostRepository>);

    let active = create_test_post_with(&db, "active", postdesk::PostStatus::Published, false).await;
    let deleted = create_test_post_with(&db, "deleted", postdesk::PostStatus::Draft, true).await;

    assert!(!specification.is_satisfied_by(&active.id).await.unwrap());
    assert!(specification.is_satisfied_by(&deleted.id).await.unwrap());
    // Unknown posts are simply not in the deleted scope.
    assert!(!specification.is_satisfied_by("missing").await.unwrap());
}

#[tokio::test]
async fn test_specification_requeries_storage() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let specification = DeletionSpecification::new(Arc::new(db.clone()) as Arc<dyn PostRepository>);

    let post = create_test_post(&db, "stale copy").await;
    assert!(!post.is_deleted);

    // Mutated behind the back of the in-memory `post`.
    db.set_post_deleted(&post.id, true).await.unwrap();

    assert!(specification.is_satisfied_by(&post.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_then_second_delete_is_rejected() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);
    let post = create_test_post(&db, "to delete").await;

    assert!(services.posts.delete_command().callable(&post.id).await.unwrap());
    assert_ok!(services.posts.delete_post(&post.id).await);
    assert!(is_deleted_in_db(&db, &post.id).await);

    let err = assert_err!(services.posts.delete_post(&post.id).await);
    assert!(err.is_precondition_violation(), "unexpected error: {}", err);
    assert!(is_deleted_in_db(&db, &post.id).await);
    assert_eq!(services.events.count("post_deleted"), 1);
}

#[tokio::test]
async fn test_restore_requires_deleted_post() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);
    let post = create_test_post(&db, "never deleted").await;

    assert!(!services.posts.restore_command().callable(&post.id).await.unwrap());
    let err = assert_err!(services.posts.restore_post(&post.id).await);
    assert!(matches!(err, DomainError::PreconditionViolation(_)));
    assert!(!is_deleted_in_db(&db, &post.id).await);
    assert!(services.events.events().is_empty());
}

#[tokio::test]
async fn test_restore_clears_flag() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);
    let post = create_test_post_with(&db, "hidden", postdesk::PostStatus::Published, true).await;

    assert_ok!(services.posts.restore_post(&post.id).await);

    assert!(!is_deleted_in_db(&db, &post.id).await);
    assert_eq!(services.events.count("post_restored"), 1);
}

#[tokio::test]
async fn test_delete_then_restore_returns_to_original_state() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);
    let post = create_test_post(&db, "round trip").await;

    services.posts.delete_post(&post.id).await.unwrap();
    services.posts.restore_post(&post.id).await.unwrap();

    let reloaded = db.get_post_by_id(&post.id).await.unwrap().unwrap();
    assert!(!reloaded.is_deleted);
    assert_eq!(reloaded.title, post.title);
    assert_eq!(reloaded.status, post.status);

    let names: Vec<&str> = services.events.events().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["post_deleted", "post_restored"]);
}

#[tokio::test]
async fn test_unknown_post_is_not_found() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);

    let delete = services.posts.delete_post("does-not-exist").await;
    assert!(matches!(delete, Err(DomainError::NotFound(_))));

    let restore = services.posts.restore_post("does-not-exist").await;
    assert!(matches!(restore, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_and_restore_scenario() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let services = build_services(&db);
    let post = create_test_post(&db, "scenario").await;

    services.posts.delete_post(&post.id).await.unwrap();

    assert!(is_deleted_in_db(&db, &post.id).await);
    let active = services.posts.list_active_posts(None).await.unwrap();
    assert!(!ids(&active).contains(&post.id));
    let deleted = services.posts.list_deleted_posts().await.unwrap();
    assert_eq!(ids(&deleted), vec![post.id.clone()]);
    assert_eq!(services.posts.count_deleted_posts().await.unwrap(), 1);

    services.posts.restore_post(&post.id).await.unwrap();

    assert!(!is_deleted_in_db(&db, &post.id).await);
    let active = services.posts.list_active_posts(None).await.unwrap();
    assert!(ids(&active).contains(&post.id));
    assert_eq!(services.posts.count_deleted_posts().await.unwrap(), 0);
}

#[tokio::test]
async fn test_transitions_publish_to_broadcast_log() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let log = Arc::new(BroadcastPostEventLog::new(16));
    let mut stream = log.subscribe();
    let posts = postdesk::bootstrap::build_post_service(&db, log.clone(), fast_lock_settings());
    let post = create_test_post(&db, "broadcast").await;

    posts.delete_post(&post.id).await.unwrap();
    posts.restore_post(&post.id).await.unwrap();

    let received: Vec<PostEvent> = stream
        .by_ref()
        .take(2)
        .map(|e| e.expect("lagged"))
        .collect()
        .await;
    assert!(matches!(&received[0], PostEvent::PostDeleted { post_id, .. } if post_id == &post.id));
    assert!(matches!(&received[1], PostEvent::PostRestored { post_id, .. } if post_id == &post.id));
}
