use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    domain::entities::Comment,
    infrastructure::http::middleware::{ApiResult, AppState},
};

#[derive(Debug, Serialize)]
pub struct DueRemindersResponse {
    pub comments: Vec<Comment>,
}

/// POST /api/reminders/claim - Hand due question reminders to the notifier
///
/// Returned comments are marked as reminded, so each is handed out once.
pub async fn claim_due_reminders(
    State(state): State<AppState>,
) -> ApiResult<Json<DueRemindersResponse>> {
    let comments = state.reminder_service.claim_due_reminders().await?;
    Ok(Json(DueRemindersResponse { comments }))
}
