//! The tenant context of one navigation.

use serde::{Deserialize, Serialize};

use super::features::TenantFeatures;
use super::identifiers::TenantId;
use super::roles::{Role, RoleClaim};

/// Tenant, membership role, and feature switches of the current navigation.
///
/// Built fresh for every navigation and passed into each scoped call; it is
/// never cached across tenant switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub role: RoleClaim,
    #[serde(default)]
    pub features: TenantFeatures,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>, raw_role: &str) -> Self {
        Self {
            tenant_id: TenantId::new(tenant_id),
            role: RoleClaim::parse(raw_role),
            features: TenantFeatures::default(),
        }
    }

    pub fn with_features(mut self, features: TenantFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn effective_role(&self) -> Role {
        self.role.effective()
    }
}
