//! Cycle models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-boxed cycle of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub number: u32,
    pub name: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Completion ratio between 0 and 1.
    pub progress: f64,
}

impl Cycle {
    /// Name, falling back to `Cycle <number>`.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Cycle {}", self.number),
        }
    }
}
