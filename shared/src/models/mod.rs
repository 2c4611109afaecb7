//! Data models
//!
//! Shared between complaint-server and its clients (via API).
//! All IDs are `i64` epoch milliseconds.

pub mod complaint;

// Re-exports
pub use complaint::*;
