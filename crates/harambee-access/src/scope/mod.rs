//! Tenant scoping of queries and project reference resolution.

pub mod filter;
pub mod guard;

pub use filter::{apply_tenant_filter, TENANT_COLUMN};
pub use guard::{not_found, TenantScopeGuard, PROJECTS_RELATION};
