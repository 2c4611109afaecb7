//! Error category by code range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx
    Auth,
    /// 2xxx
    Permission,
    /// 4xxx
    Complaint,
    /// 9xxx and anything unassigned; logged at `error` by the HTTP layer
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Complaint,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1008), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2003), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Complaint);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_every_code_has_expected_category() {
        for code in ErrorCode::ALL {
            let expected = match code.code() / 1000 {
                0 => ErrorCategory::General,
                1 => ErrorCategory::Auth,
                2 => ErrorCategory::Permission,
                4 => ErrorCategory::Complaint,
                _ => ErrorCategory::System,
            };
            assert_eq!(code.category(), expected, "{code}");
        }
    }
}
