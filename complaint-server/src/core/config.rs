use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{AdminAccount, JwtConfig};
use crate::core::Result;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (complaints.redb) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 (未设置则只输出到终端) |
/// | ADMIN_USERNAME | admin | 管理员账号 |
/// | ADMIN_PASSWORD_HASH | - | argon2 哈希; 未设置则禁止登录 |
///
/// JWT 相关变量见 [`JwtConfig::from_env`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/complaints HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 默认日志级别 (`RUST_LOG` 优先)
    pub log_level: String,
    /// 滚动日志目录
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 管理员账号
    pub admin: AdminAccount,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(
            |key| std::env::var(key).ok(),
            JwtConfig::from_env()?,
            AdminAccount::from_env(),
        ))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        jwt: JwtConfig,
        admin: AdminAccount,
    ) -> Self {
        Self {
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./data".into()),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: lookup("LOG_LEVEL")
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
            jwt,
            admin,
        }
    }

    /// 测试用配置 (固定 JWT 密钥, 指定管理员)
    pub fn for_tests(work_dir: impl Into<String>, admin: AdminAccount) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            request_timeout_ms: 30000,
            log_level: "debug".into(),
            log_dir: None,
            jwt: JwtConfig::with_secret("complaint-server-test-secret-0123456789"),
            admin,
        }
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
