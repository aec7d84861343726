//! Shared types for the POS service
//!
//! Domain models (tables, sessions, checks, lines), request payloads and the
//! unified error system used by the server and its clients.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
