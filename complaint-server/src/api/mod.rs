//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理员登录
//! - [`complaints`] - 公共提交与远程投诉 API
//! - [`admin`] - 管理端列表、统计与单条变更

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod health;
