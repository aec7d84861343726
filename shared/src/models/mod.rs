//! Data models
//!
//! Shared between the POS server and its clients (via API).
//! IDs are strings: table slugs (`d-01`) and uuid v4 for sessions, checks
//! and lines. Timestamps are Unix millis.

pub mod check;
pub mod dining_table;
pub mod menu;
pub mod session;
pub mod status;
pub mod table_block;

// Re-exports
pub use check::*;
pub use dining_table::*;
pub use menu::*;
pub use session::*;
pub use status::*;
pub use table_block::*;
