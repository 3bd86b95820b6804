//! Project reference resolution within one tenant.

use std::sync::Arc;

use harambee_core::errors::StoreResult;
use harambee_core::traits::{RowStore, SelectQuery};
use harambee_core::types::ProjectReference;
use harambee_core::{ModuleKey, ProjectId, TenantId};
use tracing::{debug, info};

use crate::errors::{AccessError, AccessResult};
use crate::schema::is_missing_column_error;

use super::filter::apply_tenant_filter;

pub const PROJECTS_RELATION: &str = "projects";
pub const MODULE_KEY_COLUMN: &str = "module_key";
pub const CODE_COLUMN: &str = "code";

/// Resolves logical project references to ids owned by the requesting tenant.
///
/// Every lookup goes through `apply_tenant_filter`; a reference never resolves
/// to another tenant's row, even when one matches by code or module key.
pub struct TenantScopeGuard {
    store: Arc<dyn RowStore>,
    known_modules: Vec<ModuleKey>,
}

impl TenantScopeGuard {
    pub fn new(store: Arc<dyn RowStore>, known_modules: Vec<ModuleKey>) -> Self {
        Self {
            store,
            known_modules,
        }
    }

    pub fn known_modules(&self) -> &[ModuleKey] {
        &self.known_modules
    }

    /// Classify a raw reference against this guard's known modules.
    pub fn parse_reference(&self, raw: &str) -> ProjectReference {
        ProjectReference::parse_with(raw, &self.known_modules)
    }

    pub fn resolve_project_id(
        &self,
        reference: &ProjectReference,
        tenant: &TenantId,
    ) -> AccessResult<ProjectId> {
        match reference {
            ProjectReference::Numeric(id) => Ok(ProjectId(*id)),
            ProjectReference::Module(module) => self.resolve_module(module, tenant),
            ProjectReference::Code(code) => self.resolve_code(code, tenant),
        }
    }

    fn resolve_module(&self, module: &ModuleKey, tenant: &TenantId) -> AccessResult<ProjectId> {
        let found = match self.first_id(MODULE_KEY_COLUMN, module.as_str(), tenant) {
            Ok(found) => found,
            Err(e) if is_missing_column_error(&e, MODULE_KEY_COLUMN) => {
                info!(
                    module = %module,
                    tenant = %tenant,
                    "module_key column missing; resolving by legacy code"
                );
                self.first_id(CODE_COLUMN, &module.legacy_code(), tenant)?
            }
            Err(e) => return Err(e.into()),
        };
        found.ok_or_else(|| not_found(&ProjectReference::Module(module.clone())))
    }

    fn resolve_code(&self, code: &str, tenant: &TenantId) -> AccessResult<ProjectId> {
        let code = code.trim().to_uppercase();
        self.first_id(CODE_COLUMN, &code, tenant)?
            .ok_or_else(|| not_found(&ProjectReference::Code(code)))
    }

    /// First project of `tenant` with `column = value`, by display order
    /// then creation time.
    fn first_id(&self, column: &str, value: &str, tenant: &TenantId) -> StoreResult<Option<ProjectId>> {
        let query = SelectQuery::table(PROJECTS_RELATION)
            .select(&["id"])
            .eq(column, value)
            .order_by("display_order", true)
            .order_by("created_at", true)
            .limit(1);
        let query = apply_tenant_filter(query, Some(tenant));
        let id = self.store.select_ids(&query)?.into_iter().next().map(ProjectId);
        debug!(column, value, tenant = %tenant, found = id.is_some(), "Project lookup");
        Ok(id)
    }
}

/// The `NotFound` error for a reference that matched nothing in its tenant.
pub fn not_found(reference: &ProjectReference) -> AccessError {
    AccessError::NotFound(match reference {
        ProjectReference::Numeric(id) => format!("Project not found for id {id}"),
        ProjectReference::Module(module) => format!("Project not found for module {module}"),
        ProjectReference::Code(code) => {
            format!("Project not found for code {}", code.trim().to_uppercase())
        }
    })
}
