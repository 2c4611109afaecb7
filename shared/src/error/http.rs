//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed
            | Self::RequiredField
            | Self::TooManyAttachments
            | Self::InvalidComplaintField => StatusCode::BAD_REQUEST,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            Self::AdminRequired | Self::LoginDisabled => StatusCode::FORBIDDEN,

            Self::ComplaintNotFound => StatusCode::NOT_FOUND,

            Self::AttachmentTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
