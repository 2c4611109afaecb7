//! 统一错误系统
//!
//! - [`ErrorCode`]: 数字错误码, 按首位分区 (0 通用 / 1 认证 / 2 权限 / 4 投诉 / 9 系统)
//! - [`ErrorCategory`]: 由错误码区间得出
//! - [`AppError`]: 错误码 + 消息 + 结构化详情, 实现 axum `IntoResponse`
//! - [`ApiResponse`]: 错误响应体
//!
//! ```
//! use shared::error::{ApiResponse, AppError};
//!
//! let err = AppError::invalid_field("email", "Email is not valid");
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(2));
//! assert_eq!(body.details.unwrap()["field"], "email");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
