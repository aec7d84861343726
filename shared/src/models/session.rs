//! Seating session model

use super::status::ServiceStatus;
use serde::{Deserialize, Serialize};

/// One seating occupancy of one or more tables
///
/// The first entry of `table_ids` is the primary table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub table_ids: Vec<String>,
    pub status: ServiceStatus,
    pub party_size: u32,
    /// Seated-at timestamp (Unix millis)
    pub opened_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guest_names: Vec<String>,
    /// Staff member who seated the party
    pub opened_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    pub check_id: String,
}

impl Session {
    pub fn primary_table(&self) -> Option<&str> {
        self.table_ids.first().map(String::as_str)
    }

    pub fn covers(&self, table_id: &str) -> bool {
        self.table_ids.iter().any(|t| t == table_id)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
