//! 工具模块
//!
//! - [`logger`] - 日志初始化

pub mod logger;
