//! POS core: table sessions, checks and lines
//!
//! - [`store::PosStore`] - the mutation store, one per process
//! - [`registry`] - table → active session index
//! - [`check`] - pure check/line rules
//! - [`view`] - floor projection ([`shared::models::TableBlock`])
//! - [`storage`] - redb write-through

pub mod check;
pub mod error;
pub mod floor_plan;
pub mod money;
pub mod registry;
pub mod storage;
pub mod store;
pub mod view;

pub use error::{PosError, PosResult};
pub use floor_plan::{FloorPlan, FloorPlanError};
pub use storage::{PosStorage, StorageError};
pub use store::PosStore;
pub use view::derive_table_blocks;
