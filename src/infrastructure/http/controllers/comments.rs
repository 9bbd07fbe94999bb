use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    domain::entities::{Comment, CreateCommentRequest},
    infrastructure::http::middleware::{ApiResult, AppState},
};

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub post_id: String,
    pub comments: Vec<Comment>,
}

/// GET /api/posts/:id/comments - Comments on an active post
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<CommentListResponse>> {
    let comments = state.comment_service.list_comments(&post_id).await?;
    Ok(Json(CommentListResponse { post_id, comments }))
}

/// POST /api/posts/:id/comments - Comment on an active post
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = state.comment_service.create_comment(&post_id, req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
