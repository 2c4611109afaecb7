//! Complaint Server - 交通投诉受理与管理服务
//!
//! # 模块结构
//!
//! ```text
//! complaint-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── auth/          # JWT 认证、管理员账号
//! ├── store/         # 投诉存储 (redb / 内存)
//! ├── complaints/    # 提交、管理端列表与变更
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod auth;
pub mod complaints;
pub mod core;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{AdminAccount, CurrentUser, JwtService};
pub use complaints::{AdminListController, ComplaintService};
pub use core::{Config, Server, ServerError, ServerState, build_app};
pub use store::{ComplaintRepository, MemoryComplaintStore, RedbComplaintStore, StorageError};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env, 读取配置, 按配置初始化日志
pub fn setup_environment() -> Result<Config, ServerError> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    if config.jwt.secret_generated {
        tracing::warn!("⚠️  JWT_SECRET not set! Using a generated temporary key for development.");
    }
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______                      __      _       __
  / ____/___  ____ ___  ____  / /___ _(_)___  / /_
 / /   / __ \/ __ `__ \/ __ \/ / __ `/ / __ \/ __/
/ /___/ /_/ / / / / / / /_/ / / /_/ / / / / / /_
\____/\____/_/ /_/ /_/ .___/_/\__,_/_/_/ /_/\__/
                    /_/
    "#
    );
}
