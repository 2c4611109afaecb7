//! Admin Complaint Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{AdminComplaintCreate, Complaint, ComplaintStats, FieldUpdate};
use shared::query::{ListQuery, ListState, PaginatedResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;

/// One page of the admin table
pub async fn list_page(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Json<PaginatedResponse<Complaint>> {
    Json(state.admin_list(ListState::from(query)).view())
}

pub async fn stats(State(state): State<ServerState>) -> Json<ComplaintStats> {
    Json(state.admin_list(ListState::default()).stats())
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(create): Json<AdminComplaintCreate>,
) -> Result<(StatusCode, Json<Complaint>), AppError> {
    let complaint = state.admin_list(ListState::default()).create(create)?;
    tracing::debug!(id = complaint.id, operator = %user.username, "Admin create");
    Ok((StatusCode::CREATED, Json(complaint)))
}

pub async fn update_field(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<Complaint>, AppError> {
    tracing::debug!(id, field = update.field_name(), operator = %user.username, "Admin edit");
    state
        .admin_list(ListState::default())
        .update_field(id, update)?
        .map(Json)
        .ok_or_else(|| AppError::complaint_not_found(id))
}

pub async fn resolve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Complaint>, AppError> {
    tracing::debug!(id, operator = %user.username, "Admin resolve");
    state
        .admin_list(ListState::default())
        .resolve(id)?
        .map(Json)
        .ok_or_else(|| AppError::complaint_not_found(id))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<bool>, AppError> {
    tracing::debug!(id, operator = %user.username, "Admin delete");
    if state.admin_list(ListState::default()).delete(id)? {
        Ok(Json(true))
    } else {
        Err(AppError::complaint_not_found(id))
    }
}
