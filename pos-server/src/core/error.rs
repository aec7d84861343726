use crate::auth::JwtError;
use crate::pos::{FloorPlanError, PosError, StorageError};
use thiserror::Error;

/// Startup and serve-loop failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] JwtError),

    #[error("Floor plan error: {0}")]
    FloorPlan(#[from] FloorPlanError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("POS store error: {0}")]
    Pos(#[from] PosError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
