//! 投诉业务层
//!
//! - [`ComplaintService`] - 公共提交、远程 API 的列表与整单更新
//! - [`AdminListController`] - 管理端列表视图 (搜索、排序、分页) 与单条变更

mod admin;
mod service;

pub use admin::AdminListController;
pub use service::ComplaintService;
