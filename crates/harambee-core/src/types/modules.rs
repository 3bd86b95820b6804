//! Project module keys.
//!
//! A module key names a built-in project type (`jpp`, `jgf`) so a project can
//! be addressed without knowing its numeric id. Keys are stored lowercase.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Built-in module keys every tenant ships with.
pub const BUILTIN_MODULES: [&str; 2] = ["jpp", "jgf"];

/// A normalized (lowercase) project module key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleKey(String);

impl ModuleKey {
    /// Normalize and validate a raw key. Returns `None` for empty input or
    /// characters outside `[a-z0-9_]`.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        Some(Self(key))
    }

    pub fn jpp() -> Self {
        Self("jpp".to_string())
    }

    pub fn jgf() -> Self {
        Self("jgf".to_string())
    }

    /// The built-in module set.
    pub fn builtins() -> Vec<ModuleKey> {
        BUILTIN_MODULES.iter().map(|k| Self(k.to_string())).collect()
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_MODULES.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Legacy project code for this module (uppercase key), used where the
    /// `module_key` column is not deployed yet.
    pub fn legacy_code(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModuleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ModuleKey::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid module key: {raw:?}")))
    }
}
