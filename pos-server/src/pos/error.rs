//! POS store errors

use super::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Failure of a store operation
///
/// Every variant maps onto one status class through [`ErrorCode::http_status`].
#[derive(Debug, Error)]
pub enum PosError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Check not found: {0}")]
    CheckNotFound(String),

    #[error("Line not found: {0}")]
    LineNotFound(String),

    #[error("Table {0} already has an active session")]
    TableOccupied(String),

    #[error("Tables {requested:?} conflict with active sessions {sessions:?}")]
    TableConflict {
        requested: Vec<String>,
        sessions: Vec<String>,
    },

    #[error("Revision mismatch: expected {expected}, current {actual}")]
    RevisionMismatch { expected: u64, actual: u64 },

    #[error("Check {0} is closed")]
    CheckClosed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type PosResult<T> = Result<T, PosError>;

impl PosError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            PosError::InvalidInput(_) => ErrorCode::ValidationFailed,
            PosError::TableNotFound(_) => ErrorCode::TableNotFound,
            PosError::CheckNotFound(_) => ErrorCode::CheckNotFound,
            PosError::LineNotFound(_) => ErrorCode::LineNotFound,
            PosError::TableOccupied(_) => ErrorCode::TableOccupied,
            PosError::TableConflict { .. } => ErrorCode::TableConflict,
            PosError::RevisionMismatch { .. } => ErrorCode::RevisionMismatch,
            PosError::CheckClosed(_) => ErrorCode::CheckClosed,
            PosError::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    /// HTTP status class (400/404/409/500)
    pub fn status_code(&self) -> http::StatusCode {
        self.error_code().http_status()
    }
}

impl From<PosError> for AppError {
    fn from(err: PosError) -> Self {
        let code = err.error_code();
        let message = err.to_string();
        match err {
            PosError::InvalidInput(msg) => AppError::with_message(code, msg),
            PosError::TableNotFound(id) | PosError::TableOccupied(id) => {
                AppError::with_message(code, message).with_detail("tableId", id)
            }
            PosError::CheckNotFound(id) | PosError::CheckClosed(id) => {
                AppError::with_message(code, message).with_detail("checkId", id)
            }
            PosError::LineNotFound(id) => {
                AppError::with_message(code, message).with_detail("lineId", id)
            }
            PosError::TableConflict {
                requested,
                sessions,
            } => AppError::with_message(code, message)
                .with_detail("requested", requested)
                .with_detail("sessions", sessions),
            PosError::RevisionMismatch { expected, actual } => {
                AppError::with_message(code, message)
                    .with_detail("expected", expected)
                    .with_detail("actual", actual)
            }
            // Logged once, when the response is rendered
            PosError::Storage(_) => AppError::database(message),
        }
    }
}
