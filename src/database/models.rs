//! Data models for Passgen database entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::{ClassCounts, PasswordOptions};

/// Database properties and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PGProperties {
    /// Unique database identifier (32 chars)
    pub database_id: String,
    /// Database schema version
    pub version: String,
    /// Creation timestamp
    pub create_timestamp: Option<DateTime<Utc>>,
    /// Last update timestamp
    pub update_timestamp: Option<DateTime<Utc>>,
}

impl Default for PGProperties {
    fn default() -> Self {
        Self {
            database_id: String::new(),
            version: crate::DB_VERSION.to_string(),
            create_timestamp: None,
            update_timestamp: None,
        }
    }
}

/// Settings a history entry was generated with
pub type GenerationSettings = PasswordOptions;

/// One generated password in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Entry ID (`<unix millis>-<9 alphanumerics>`)
    pub id: String,
    /// The generated password
    pub password: String,
    /// When it was generated
    pub timestamp: DateTime<Utc>,
    /// Requested length
    pub length: usize,
    /// Enabled character classes
    pub settings: GenerationSettings,
}

impl HistoryEntry {
    /// Per-class composition of the stored password
    pub fn composition(&self) -> ClassCounts {
        ClassCounts::of(&self.password)
    }
}
