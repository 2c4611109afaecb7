//! Numeric error codes
//!
//! The leading digit names the domain: 0xxx general, 1xxx auth,
//! 2xxx permission, 4xxx complaint, 9xxx system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every error body
///
/// Serialized as a bare number so browser and client code can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ── 0xxx ──
    ValidationFailed = 2,
    RequiredField = 7,

    // ── 1xxx ──
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    /// No admin password hash configured
    LoginDisabled = 1008,

    // ── 2xxx ──
    AdminRequired = 2003,

    // ── 4xxx ──
    ComplaintNotFound = 4001,
    TooManyAttachments = 4002,
    AttachmentTooLarge = 4003,
    /// Value outside an enumerated domain (type, urgency, status, date)
    InvalidComplaintField = 4004,

    // ── 9xxx ──
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 14] = [
        Self::ValidationFailed,
        Self::RequiredField,
        Self::NotAuthenticated,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::LoginDisabled,
        Self::AdminRequired,
        Self::ComplaintNotFound,
        Self::TooManyAttachments,
        Self::AttachmentTooLarge,
        Self::InvalidComplaintField,
        Self::InternalError,
        Self::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message when the caller gives none
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::RequiredField => "Required field is missing",
            Self::NotAuthenticated => "Admin login required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Session has expired, please log in again",
            Self::TokenInvalid => "Authentication token is invalid",
            Self::LoginDisabled => "Admin login is not configured",
            Self::AdminRequired => "Administrator role is required",
            Self::ComplaintNotFound => "Complaint not found",
            Self::TooManyAttachments => "Too many attachments",
            Self::AttachmentTooLarge => "Attachment is too large",
            Self::InvalidComplaintField => "Invalid complaint field value",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Complaint storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of [`ErrorCode::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
