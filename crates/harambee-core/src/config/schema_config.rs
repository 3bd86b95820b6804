//! Schema-drift fallback switch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchemaConfig {
    /// Allow switching to static fixture data after a schema-drift error.
    /// Ignored in production. Default: true.
    pub fallback_enabled: Option<bool>,
}

impl SchemaConfig {
    pub fn effective_fallback_enabled(&self) -> bool {
        self.fallback_enabled.unwrap_or(true)
    }
}
