//! Reference data: tables and menu
//!
//! Loaded once at startup from a JSON seed file (`POS_SEED_FILE`) or the
//! built-in floor plan. Immutable afterwards.

use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, Table, Zone};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid floor plan: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorPlan {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl FloorPlan {
    /// Parse and validate a seed document
    pub fn from_json(raw: &str) -> Result<Self, FloorPlanError> {
        let plan: FloorPlan = serde_json::from_str(raw)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FloorPlanError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<(), FloorPlanError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if table.id.trim().is_empty() {
                return Err(FloorPlanError::Invalid("table id must not be blank".into()));
            }
            if !seen.insert(table.id.as_str()) {
                return Err(FloorPlanError::Invalid(format!(
                    "duplicate table id {}",
                    table.id
                )));
            }
        }
        Ok(())
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Default room: ten dining tables, a six-seat bar and the chef's counter
    pub fn builtin() -> Self {
        let mut tables: Vec<Table> = (1..=10)
            .map(|n| Table {
                id: format!("d-{n:02}"),
                label: format!("D{n}"),
                seats: if n <= 6 { 2 } else { 4 },
                zone: Zone::Dining,
                combinable: true,
            })
            .collect();
        tables.extend((1..=6).map(|n| Table {
            id: format!("b-{n:02}"),
            label: format!("Bar {n}"),
            seats: 1,
            zone: Zone::Bar,
            combinable: false,
        }));
        tables.push(Table {
            id: "chef-01".to_string(),
            label: "Chef's Counter".to_string(),
            seats: 8,
            zone: Zone::Chef,
            combinable: false,
        });

        let menu = [
            ("m-oyster", "Oyster", 28.0, "first", "raw"),
            ("m-crudo", "Hamachi Crudo", 24.0, "first", "raw"),
            ("m-bread", "Bread & Butter", 8.0, "first", "pastry"),
            ("m-duck", "Dry-aged Duck", 62.0, "main", "hot"),
            ("m-bass", "Sea Bass", 48.0, "main", "hot"),
            ("m-tart", "Brown Butter Tart", 14.0, "dessert", "pastry"),
        ]
        .into_iter()
        .map(|(id, name, price, course, station)| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price,
            course: Some(course.to_string()),
            station: Some(station.to_string()),
        })
        .collect();

        Self { tables, menu }
    }
}
