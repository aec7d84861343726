//! Unified error codes for the POS service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Check / line errors
//! - 7xxx: Table / session errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Check ====================
    /// Check not found
    CheckNotFound = 4001,
    /// Check is closed and no longer accepts mutations
    CheckClosed = 4003,
    /// Line not found on the check
    LineNotFound = 4006,
    /// Expected revision does not match the current one
    RevisionMismatch = 4010,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table already has an active session
    TableOccupied = 7002,
    /// Requested tables are claimed by an incompatible session
    TableConflict = 7005,

    // ==================== 9xxx: System ====================
    /// Database / persistence error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Check
            ErrorCode::CheckNotFound => "Check not found",
            ErrorCode::CheckClosed => "Check is already closed",
            ErrorCode::LineNotFound => "Line not found",
            ErrorCode::RevisionMismatch => "Check was modified by another device, refresh and retry",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table is occupied",
            ErrorCode::TableConflict => "Tables are claimed by another session",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
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
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Check
            4001 => Ok(ErrorCode::CheckNotFound),
            4003 => Ok(ErrorCode::CheckClosed),
            4006 => Ok(ErrorCode::LineNotFound),
            4010 => Ok(ErrorCode::RevisionMismatch),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7005 => Ok(ErrorCode::TableConflict),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);

        assert_eq!(ErrorCode::CheckNotFound.code(), 4001);
        assert_eq!(ErrorCode::RevisionMismatch.code(), 4010);

        assert_eq!(ErrorCode::TableOccupied.code(), 7002);
        assert_eq!(ErrorCode::TableConflict.code(), 7005);

        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::CheckNotFound,
            ErrorCode::CheckClosed,
            ErrorCode::LineNotFound,
            ErrorCode::RevisionMismatch,
            ErrorCode::TableNotFound,
            ErrorCode::TableOccupied,
            ErrorCode::TableConflict,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(4002), Err(InvalidErrorCode(4002)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::RevisionMismatch).unwrap();
        assert_eq!(json, "4010");

        let code: ErrorCode = serde_json::from_str("7002").unwrap();
        assert_eq!(code, ErrorCode::TableOccupied);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::CheckNotFound.message(), "Check not found");
        assert_eq!(ErrorCode::TableOccupied.message(), "Table is occupied");
    }
}
