//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::CheckNotFound | Self::LineNotFound | Self::TableNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::CheckClosed
            | Self::RevisionMismatch
            | Self::TableOccupied
            | Self::TableConflict => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation)
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
        }
    }
}
