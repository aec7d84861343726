//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Seating zone (堂食 / 吧台 / 厨师台)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[default]
    Dining,
    Bar,
    Chef,
}

/// Dining table entity (桌台)
///
/// Reference data loaded at startup; the POS core never creates or removes
/// tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Slug, e.g. `d-01`
    pub id: String,
    /// Display label, e.g. `D1`
    pub label: String,
    pub seats: u32,
    #[serde(default)]
    pub zone: Zone,
    /// Whether the table may be pushed together with neighbours
    #[serde(default)]
    pub combinable: bool,
}
