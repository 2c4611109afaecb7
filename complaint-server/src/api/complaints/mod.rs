//! 投诉路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/complaints | GET | 全部投诉 | 管理员 |
//! | /api/complaints | POST | 提交投诉 (JSON) | 无 |
//! | /api/complaints/form | POST | 提交投诉 (multipart) | 无 |
//! | /api/complaints/{id} | PUT | 整单更新 | 管理员 |

mod form;
mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{post, put},
};

use crate::core::ServerState;

pub use form::MAX_FORM_BODY;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/complaints", post(handler::submit).get(handler::list))
        .route(
            "/api/complaints/form",
            post(handler::submit_form).layer(DefaultBodyLimit::max(MAX_FORM_BODY)),
        )
        .route("/api/complaints/{id}", put(handler::replace))
}
