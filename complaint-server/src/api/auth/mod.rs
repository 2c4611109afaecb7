//! 认证路由

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// 认证路由
/// - /api/auth/login: 公共路由 (require_auth 跳过)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}
