//! 认证授权模块
//!
//! 提供 JWT 认证和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`AdminAccount`] - 管理员账号 (argon2 哈希)
//! - [`require_auth`] - 认证中间件

pub mod account;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use account::AdminAccount;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
