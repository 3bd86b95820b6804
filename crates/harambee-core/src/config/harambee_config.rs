//! Top-level configuration.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::config_error::{ConfigError, ConfigResult};
use crate::types::modules::ModuleKey;

use super::{ReminderConfig, SchemaConfig, StorageConfig};

/// Deployment environment. Schema fallback is only ever active outside
/// production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

/// Module keys recognized in project references besides the built-ins.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModulesConfig {
    pub extra: Vec<ModuleKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HarambeeConfig {
    pub environment: Environment,
    pub reminders: ReminderConfig,
    pub schema: SchemaConfig,
    pub modules: ModulesConfig,
    pub storage: StorageConfig,
}

impl HarambeeConfig {
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), environment = %config.environment, "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.reminders.interval_minutes == Some(0) {
            return Err(ConfigError::Invalid(
                "reminders.interval_minutes must be greater than 0".to_string(),
            ));
        }
        if self.reminders.unread_poll_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "reminders.unread_poll_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Built-in module keys plus configured extras, deduplicated.
    pub fn known_modules(&self) -> Vec<ModuleKey> {
        let mut modules = ModuleKey::builtins();
        for key in &self.modules.extra {
            if !modules.contains(key) {
                modules.push(key.clone());
            }
        }
        modules
    }

    /// Whether schema fallback may engage in this deployment.
    pub fn fallback_permitted(&self) -> bool {
        !self.environment.is_production() && self.schema.effective_fallback_enabled()
    }
}
