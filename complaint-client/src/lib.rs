//! Complaint Client - HTTP client for the complaint server
//!
//! Provides network-based HTTP calls to the complaint API, plus thin shells
//! for the detection and simulation services behind the feature cards.

pub mod complaints;
pub mod config;
pub mod error;
pub mod features;
pub mod http;

pub use complaints::{RemoteComplaints, UploadFile};
pub use config::{ClientConfig, FeatureEndpoints};
pub use error::{ClientError, ClientResult, ErrorBody};
pub use features::{FeatureClient, SimulationMessage};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{HealthResponse, LoginResponse, UserInfo};
pub use shared::models::{Complaint, ComplaintDraft};
pub use shared::query::{ListQuery, PaginatedResponse};
