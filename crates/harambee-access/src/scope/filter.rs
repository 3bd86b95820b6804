//! The mandatory tenant predicate.

use harambee_core::traits::SelectQuery;
use harambee_core::TenantId;
use tracing::debug;

/// Column carrying the owning tenant on every tenant-scoped relation.
pub const TENANT_COLUMN: &str = "tenant_id";

/// Scope `query` to `tenant`.
///
/// Any tenant predicate already on the query is replaced, so the result
/// carries exactly one. `None` is the legacy/global mode and returns the
/// query unchanged.
pub fn apply_tenant_filter(query: SelectQuery, tenant: Option<&TenantId>) -> SelectQuery {
    match tenant {
        Some(tenant) => query
            .without_filters_on(TENANT_COLUMN)
            .eq(TENANT_COLUMN, tenant.as_str()),
        None => {
            debug!(relation = %query.relation, "Unscoped query (no tenant)");
            query
        }
    }
}
