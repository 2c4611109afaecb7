//! 管理员投诉路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/complaints | GET | 搜索、排序、分页 |
//! | /api/admin/complaints | POST | 新建投诉 |
//! | /api/admin/complaints/stats | GET | 状态统计 |
//! | /api/admin/complaints/{id} | PATCH | 修改单个字段 |
//! | /api/admin/complaints/{id} | DELETE | 删除 |
//! | /api/admin/complaints/{id}/resolve | POST | 标记已解决 |
//!
//! 全部需要管理员令牌 (由全局 require_auth 中间件检查)

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/complaints",
            get(handler::list_page).post(handler::create),
        )
        .route("/api/admin/complaints/stats", get(handler::stats))
        .route(
            "/api/admin/complaints/{id}",
            patch(handler::update_field).delete(handler::delete),
        )
        .route("/api/admin/complaints/{id}/resolve", post(handler::resolve))
}
