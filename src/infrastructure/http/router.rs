use crate::infrastructure::http::controllers::{comments, health, posts, reminders};
use crate::infrastructure::http::middleware::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    // Static segments such as /deleted take priority over /:id.
    Router::new()
        .route("/health", get(health::health))
        .route("/api/posts", get(posts::list_active_posts))
        .route("/api/posts", post(posts::create_post))
        .route("/api/posts/deleted", get(posts::list_deleted_posts))
        .route("/api/posts/deleted/count", get(posts::count_deleted_posts))
        .route("/api/posts/:id", delete(posts::delete_post))
        .route("/api/posts/:id/restore", post(posts::restore_post))
        .route("/api/posts/:id/comments", get(comments::list_comments))
        .route("/api/posts/:id/comments", post(comments::create_comment))
        .route("/api/reminders/claim", post(reminders::claim_due_reminders))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
