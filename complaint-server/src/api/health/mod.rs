//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0", "complaints": 12 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use shared::client::HealthResponse;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 基础健康检查
///
/// 附带当前投诉数量；存储不可读时为 0
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        complaints: state.repo.load().len(),
    })
}
