//! Service lifecycle shared by sessions and checks

use serde::{Deserialize, Serialize};

/// Lifecycle of a seating and its check
///
/// `open → ordering → served → paying → closed`. The store records whatever
/// status a caller requests; ordering is a client convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Open,
    Ordering,
    Served,
    Paying,
    Closed,
}

impl ServiceStatus {
    /// Anything but `closed` keeps the tables claimed
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a table block should show this seating (`open` and `closed` do not)
    pub fn is_seated(&self) -> bool {
        !matches!(self, Self::Open | Self::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Ordering => "ordering",
            Self::Served => "served",
            Self::Paying => "paying",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Paying).unwrap(),
            "\"paying\""
        );
        let status: ServiceStatus = serde_json::from_str("\"served\"").unwrap();
        assert_eq!(status, ServiceStatus::Served);
        assert!(serde_json::from_str::<ServiceStatus>("\"SERVED\"").is_err());
    }

    #[test]
    fn test_status_flags() {
        assert!(ServiceStatus::Open.is_active());
        assert!(!ServiceStatus::Open.is_seated());
        assert!(ServiceStatus::Ordering.is_seated());
        assert!(!ServiceStatus::Closed.is_active());
        assert!(!ServiceStatus::Closed.is_seated());
    }
}
