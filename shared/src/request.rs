//! Request and response payloads for the POS API
//!
//! Field names are camelCase on the wire. Required business fields are
//! modelled as defaults/options so a missing field reaches store validation
//! (400) instead of failing JSON extraction.

use crate::models::{Check, Line, MenuItem, ServiceStatus, Session, Table, TableBlock};
use serde::{Deserialize, Serialize};

/// POST /pos/tables/{tableId}/checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureCheckRequest {
    /// Combined seating; when absent only the path table is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_slugs: Option<Vec<String>>,
}

/// POST /pos/sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub table_id: String,
    #[serde(default)]
    pub party_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
}

/// New line payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub seat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Defaults to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp: Option<bool>,
}

impl AddLineInput {
    /// Minimal line: name, seat and unit price
    pub fn new(name: impl Into<String>, seat: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            seat: seat.into(),
            price: Some(price),
            ..Default::default()
        }
    }
}

/// Partial line update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePatch {
    #[serde(default)]
    pub line_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

impl LinePatch {
    pub fn for_line(line_id: impl Into<String>) -> Self {
        Self {
            line_id: line_id.into(),
            ..Default::default()
        }
    }
}

/// Check-level update. `expected_revision` turns on the stale-write guard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_revision: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_names: Option<Vec<String>>,
}

impl CheckPatch {
    pub fn status(status: ServiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn expecting(mut self, revision: u64) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

// ========== Responses ==========

/// GET /pos/bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapResponse {
    pub tables: Vec<Table>,
    pub sessions: Vec<Session>,
    pub checks: Vec<Check>,
    pub menu: Vec<MenuItem>,
}

/// `{check}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEnvelope {
    pub check: Check,
}

/// `{session, check}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpened {
    pub session: Session,
    pub check: Check,
}

/// `{line, revision}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEnvelope {
    pub line: Line,
    pub revision: u64,
}

/// `{ok: true, revision}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
    pub revision: u64,
}

/// GET /pos/floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorResponse {
    pub blocks: Vec<TableBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_patch_camel_case() {
        let patch: CheckPatch =
            serde_json::from_str(r#"{"status":"served","expectedRevision":1}"#).unwrap();
        assert_eq!(patch.status, Some(ServiceStatus::Served));
        assert_eq!(patch.expected_revision, Some(1));
        assert!(patch.note.is_none());
    }

    #[test]
    fn test_add_line_missing_fields_deserialize() {
        let input: AddLineInput = serde_json::from_str(r#"{"seat":"1"}"#).unwrap();
        assert!(input.name.is_empty());
        assert!(input.price.is_none());
        assert!(input.qty.is_none());
    }

    #[test]
    fn test_ensure_check_request_optional_slugs() {
        let req: EnsureCheckRequest = serde_json::from_str("{}").unwrap();
        assert!(req.table_slugs.is_none());

        let req: EnsureCheckRequest =
            serde_json::from_str(r#"{"tableSlugs":["d-01","d-02"]}"#).unwrap();
        assert_eq!(req.table_slugs.unwrap(), vec!["d-01", "d-02"]);
    }
}
