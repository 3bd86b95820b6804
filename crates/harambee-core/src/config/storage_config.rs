//! Local SQLite store settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database. `None` opens an in-memory database.
    pub db_path: Option<String>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u32>,
}

impl StorageConfig {
    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms.unwrap_or(5000)
    }
}
