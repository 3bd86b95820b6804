//! Per-tenant feature switches.
//!
//! Tenants configure features as a `{name: bool}` map. A feature that is
//! absent is enabled; only an explicit `false` turns it off. Unknown names are
//! ignored so newer tenant configs never break older builds.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::pages::PageKey;

/// A tenant-switchable feature area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Welfare,
    Contributions,
    Meetings,
    Documents,
    Projects,
    Expenses,
    Reports,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Self::Welfare,
        Self::Contributions,
        Self::Meetings,
        Self::Documents,
        Self::Projects,
        Self::Expenses,
        Self::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welfare => "welfare",
            Self::Contributions => "contributions",
            Self::Meetings => "meetings",
            Self::Documents => "documents",
            Self::Projects => "projects",
            Self::Expenses => "expenses",
            Self::Reports => "reports",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|f| f.as_str() == normalized)
    }

    /// Whether this feature gates the given page.
    pub fn gates(&self, page: &PageKey) -> bool {
        match self {
            Self::Welfare => matches!(page, PageKey::Welfare | PageKey::Payouts),
            Self::Contributions => matches!(page, PageKey::Contributions),
            Self::Meetings => matches!(page, PageKey::Meetings),
            Self::Documents => matches!(page, PageKey::Documents),
            Self::Projects => matches!(page, PageKey::Projects | PageKey::ProjectModule(_)),
            Self::Expenses => matches!(page, PageKey::Expenses),
            Self::Reports => matches!(page, PageKey::Reports),
        }
    }
}

/// The set of features a tenant has switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantFeatures {
    disabled: BTreeSet<Feature>,
}

impl TenantFeatures {
    /// Everything enabled.
    pub fn all_enabled() -> Self {
        Self::default()
    }

    /// Build from a raw `{name: enabled}` map, ignoring unknown names.
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let disabled = flags
            .into_iter()
            .filter(|(_, enabled)| !enabled)
            .filter_map(|(name, _)| Feature::from_name(name))
            .collect();
        Self { disabled }
    }

    pub fn disable(mut self, feature: Feature) -> Self {
        self.disabled.insert(feature);
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        !self.disabled.contains(&feature)
    }

    /// Whether a page survives the tenant's feature switches.
    pub fn allows_page(&self, page: &PageKey) -> bool {
        !self.disabled.iter().any(|f| f.gates(page))
    }
}

impl Serialize for TenantFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, bool> = Feature::ALL
            .iter()
            .map(|f| (f.as_str(), self.is_enabled(*f)))
            .collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TenantFeatures {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(Self::from_flags(raw.iter().map(|(k, v)| (k.as_str(), *v))))
    }
}
