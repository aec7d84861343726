//! Check and line models

use super::status::ServiceStatus;
use serde::{Deserialize, Serialize};

/// One orderable entry on a check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    pub name: String,
    /// Seat label, e.g. `"1"` or `"bar"`
    pub seat: String,
    /// Unit price
    pub price: f64,
    #[serde(default = "default_qty")]
    pub qty: i32,
    /// Complimentary: kept on the check, excluded from the bill
    #[serde(default)]
    pub comp: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Fire time (Unix millis)
    pub created_at: i64,
    pub created_by: String,
}

fn default_qty() -> i32 {
    1
}

/// The billable record attached 1:1 to a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub id: String,
    pub session_id: String,
    pub status: ServiceStatus,
    pub lines: Vec<Line>,
    /// Optimistic concurrency token, bumped by every successful mutation
    pub revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Last actor to mutate the check
    pub updated_by: String,
    /// Time the most recent line was fired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fire_at: Option<i64>,
}

impl Check {
    pub fn line(&self, line_id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn is_closed(&self) -> bool {
        self.status == ServiceStatus::Closed
    }
}

/// A line together with the check revision it produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineMutation {
    pub line: Line,
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_defaults_on_deserialize() {
        let json = r#"{
            "id": "l-1",
            "name": "Oyster",
            "seat": "1",
            "price": 28.0,
            "createdAt": 0,
            "createdBy": "u-1"
        }"#;
        let line: Line = serde_json::from_str(json).unwrap();
        assert_eq!(line.qty, 1);
        assert!(!line.comp);
        assert!(line.modifiers.is_empty());
        assert!(line.course.is_none());
    }

    #[test]
    fn test_check_serializes_camel_case() {
        let check = Check {
            id: "c-1".to_string(),
            session_id: "s-1".to_string(),
            status: ServiceStatus::Open,
            lines: vec![],
            revision: 0,
            note: None,
            created_at: 1,
            updated_at: 1,
            updated_by: "u-1".to_string(),
            last_fire_at: None,
        };
        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("\"sessionId\":\"s-1\""));
        assert!(json.contains("\"status\":\"open\""));
        assert!(json.contains("\"revision\":0"));
        assert!(!json.contains("lastFireAt"));
    }
}
