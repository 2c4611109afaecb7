//! Complaint Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{Complaint, ComplaintDraft};

use super::form;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// Public JSON submission
pub async fn submit(
    State(state): State<ServerState>,
    Json(draft): Json<ComplaintDraft>,
) -> Result<(StatusCode, Json<Complaint>), AppError> {
    let complaint = state.complaints().submit(draft)?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// Public multipart submission (intake form with file inputs)
pub async fn submit_form(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Complaint>), AppError> {
    let draft = form::read_draft(multipart).await?;
    let complaint = state.complaints().submit(draft)?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// Full collection, stored order
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Complaint>> {
    Json(state.complaints().list())
}

/// Replace the citizen fields of one complaint
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(draft): Json<ComplaintDraft>,
) -> Result<Json<Complaint>, AppError> {
    tracing::debug!(id, operator = %user.username, "Replacing complaint");
    state
        .complaints()
        .replace(id, draft)?
        .map(Json)
        .ok_or_else(|| AppError::complaint_not_found(id))
}
