//! Page vocabulary shared by the policy resolver and every navigation site.
//!
//! `PageKey` is the single source of page-key strings. Parsing an unknown key
//! yields `None`, so a typo at a call site surfaces as an error instead of a
//! silently hidden page.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::modules::ModuleKey;

/// Prefix of per-module project sub-pages (`projects-jpp`).
pub const PROJECT_MODULE_PAGE_PREFIX: &str = "projects-";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageKey {
    Overview,
    Members,
    Welfare,
    Payouts,
    Contributions,
    Meetings,
    Documents,
    Projects,
    /// Sub-page of `projects` for one module.
    ProjectModule(ModuleKey),
    Expenses,
    Reports,
    Notifications,
    Settings,
    Profile,
}

impl PageKey {
    /// Every page that is not a per-module project page.
    pub const STATIC: [PageKey; 13] = [
        Self::Overview,
        Self::Members,
        Self::Welfare,
        Self::Payouts,
        Self::Contributions,
        Self::Meetings,
        Self::Documents,
        Self::Projects,
        Self::Expenses,
        Self::Reports,
        Self::Notifications,
        Self::Settings,
        Self::Profile,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(module) = raw.strip_prefix(PROJECT_MODULE_PAGE_PREFIX) {
            return ModuleKey::parse(module).map(Self::ProjectModule);
        }
        Self::STATIC.iter().find(|p| p.static_name() == Some(raw)).cloned()
    }

    fn static_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Overview => "overview",
            Self::Members => "members",
            Self::Welfare => "welfare",
            Self::Payouts => "payouts",
            Self::Contributions => "contributions",
            Self::Meetings => "meetings",
            Self::Documents => "documents",
            Self::Projects => "projects",
            Self::ProjectModule(_) => return None,
            Self::Expenses => "expenses",
            Self::Reports => "reports",
            Self::Notifications => "notifications",
            Self::Settings => "settings",
            Self::Profile => "profile",
        };
        Some(name)
    }

    /// The module of a per-module project page.
    pub fn module(&self) -> Option<&ModuleKey> {
        match self {
            Self::ProjectModule(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectModule(m) => write!(f, "{PROJECT_MODULE_PAGE_PREFIX}{m}"),
            other => f.write_str(other.static_name().unwrap_or_default()),
        }
    }
}

impl Serialize for PageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PageKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PageKey::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown page key: {raw:?}")))
    }
}
