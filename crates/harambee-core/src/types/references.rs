//! Logical project references: a numeric id, a project code, or a module key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identifiers::ProjectId;
use super::modules::ModuleKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectReference {
    /// Already a concrete row id.
    Numeric(i64),
    /// A project code, matched uppercase.
    Code(String),
    /// A built-in (or configured) module key.
    Module(ModuleKey),
}

impl ProjectReference {
    /// Classify a raw reference against the built-in module keys.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, &ModuleKey::builtins())
    }

    /// Classify a raw reference. Numeric strings become `Numeric`, strings
    /// matching one of `known_modules` (case-insensitively) become `Module`,
    /// everything else is a `Code`.
    pub fn parse_with(raw: &str, known_modules: &[ModuleKey]) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<i64>() {
                return Self::Numeric(id);
            }
        }
        if let Some(key) = ModuleKey::parse(trimmed) {
            if known_modules.contains(&key) {
                return Self::Module(key);
            }
        }
        Self::Code(trimmed.to_string())
    }

    /// The id when no lookup is needed.
    pub fn as_id(&self) -> Option<ProjectId> {
        match self {
            Self::Numeric(id) => Some(ProjectId(*id)),
            _ => None,
        }
    }
}

impl From<i64> for ProjectReference {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<ProjectId> for ProjectReference {
    fn from(id: ProjectId) -> Self {
        Self::Numeric(id.0)
    }
}

impl From<ModuleKey> for ProjectReference {
    fn from(key: ModuleKey) -> Self {
        Self::Module(key)
    }
}

impl fmt::Display for ProjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "#{id}"),
            Self::Code(code) => write!(f, "code {code}"),
            Self::Module(key) => write!(f, "module {key}"),
        }
    }
}
