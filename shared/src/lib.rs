//! Shared types for the complaint service
//!
//! Complaint model, list query pipeline, error types and API DTOs used by
//! both complaint-server and complaint-client.

pub mod client;
pub mod error;
pub mod models;
pub mod query;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use query::{ListQuery, ListState, PaginatedResponse, SortConfig, SortDirection, SortKey};
