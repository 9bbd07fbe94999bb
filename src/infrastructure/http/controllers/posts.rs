use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::entities::{CreatePostRequest, Post, PostListResponse, PostStatus},
    domain::finders::PostVisibilityFinder,
    infrastructure::http::middleware::{ApiError, ApiResult, AppState},
};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<PostStatus>,
    pub author_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// GET /api/posts - List active posts, newest first
pub async fn list_active_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let mut finder = PostVisibilityFinder::new().with_status(query.status);

    if let Some(author_id) = query.author_id {
        finder = finder.by_author(author_id);
    }

    match (query.limit, query.offset) {
        (None, None) => {}
        (None, Some(_)) => {
            return Err(ApiError::BadRequest("offset requires limit".to_string()));
        }
        (Some(limit), offset) => {
            let offset = offset.unwrap_or(0);
            if limit <= 0 || offset < 0 {
                return Err(ApiError::BadRequest(
                    "limit must be positive and offset non-negative".to_string(),
                ));
            }
            finder = finder.paginate(limit, offset);
        }
    }

    let posts = state.post_service.find_posts(&finder).await?;
    let total = posts.len();

    Ok(Json(PostListResponse { posts, total }))
}

/// POST /api/posts - Create a post
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = state.post_service.create_post(req).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts/deleted - List soft-deleted posts
pub async fn list_deleted_posts(
    State(state): State<AppState>,
) -> ApiResult<Json<PostListResponse>> {
    let posts = state.post_service.list_deleted_posts().await?;
    let total = posts.len();

    Ok(Json(PostListResponse { posts, total }))
}

/// GET /api/posts/deleted/count - Number of soft-deleted posts
pub async fn count_deleted_posts(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.post_service.count_deleted_posts().await?;
    Ok(Json(CountResponse { count }))
}

/// DELETE /api/posts/:id - Soft-delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.post_service.delete_post(&post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:id/restore - Restore a soft-deleted post
pub async fn restore_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.post_service.restore_post(&post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
