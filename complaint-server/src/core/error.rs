use thiserror::Error;

use crate::auth::JwtError;
use crate::store::StorageError;

/// 启动与运行错误
///
/// 请求级错误使用 `AppError`，此类型只覆盖会终止进程的错误。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("JWT 配置错误: {0}")]
    Jwt(#[from] JwtError),

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
