//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::error::{AppError, ErrorCode};

use crate::auth::jwt::ADMIN_ROLE;
use crate::core::ServerState;
use crate::security_log;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Verifies the admin credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !state.admin.login_enabled() {
        security_log!("WARN", "login_disabled", username = req.username.clone());
        return Err(AppError::with_message(
            ErrorCode::LoginDisabled,
            "Admin login is not configured",
        ));
    }

    let valid = state
        .admin
        .verify(&req.username, &req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if !valid {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&state.admin.username, ADMIN_ROLE)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(username = %state.admin.username, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt_service.expires_in_seconds(),
        user: UserInfo {
            username: state.admin.username.clone(),
            role: ADMIN_ROLE.to_string(),
        },
    }))
}
