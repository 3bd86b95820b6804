//! Static project data served while schema fallback is active.
//!
//! Lookups are tenant-scoped exactly like live ones.

use harambee_core::traits::Row;
use harambee_core::types::ProjectReference;
use harambee_core::{ModuleKey, ProjectId, TenantId};
use serde::{Deserialize, Serialize};

use crate::errors::AccessResult;

const EMBEDDED_PROJECTS: &str = include_str!("../fixtures/projects.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub module_key: Option<ModuleKey>,
    #[serde(default)]
    pub display_order: i64,
}

impl ProjectSummary {
    /// Decode a `projects` row; `module_key` may be absent on older schemas.
    pub fn from_row(row: Row) -> AccessResult<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(row))?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    projects: Vec<ProjectSummary>,
}

impl FixtureSet {
    pub fn embedded() -> AccessResult<Self> {
        Self::from_json(EMBEDDED_PROJECTS)
    }

    pub fn from_json(raw: &str) -> AccessResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The tenant's projects by display order.
    pub fn projects_for(&self, tenant: &TenantId) -> Vec<ProjectSummary> {
        let mut projects: Vec<ProjectSummary> = self
            .projects
            .iter()
            .filter(|p| &p.tenant_id == tenant)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.display_order);
        projects
    }

    pub fn resolve(&self, reference: &ProjectReference, tenant: &TenantId) -> Option<ProjectId> {
        if let Some(id) = reference.as_id() {
            return Some(id);
        }
        self.projects_for(tenant)
            .into_iter()
            .find(|p| match reference {
                // Legacy code only stands in for rows without a module key.
                ProjectReference::Module(module) => match &p.module_key {
                    Some(key) => key == module,
                    None => p.code == module.legacy_code(),
                },
                ProjectReference::Code(code) => p.code == code.trim().to_uppercase(),
                ProjectReference::Numeric(_) => false,
            })
            .map(|p| ProjectId(p.id))
    }
}
