//! Floor view projection

use super::dining_table::Zone;
use super::status::ServiceStatus;
use serde::{Deserialize, Serialize};

/// Read-only projection of a table, its covering session and check
///
/// Recomputed on every read; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub table_id: String,
    pub label: String,
    pub zone: Zone,
    pub seats: u32,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    /// Course of the most recently fired line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_since_fire: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_seated: Option<i64>,
    #[serde(default)]
    pub guest_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    pub line_count: usize,
    pub subtotal: f64,
    pub comp_total: f64,
    pub bill_total: f64,
}
