//! AccessRuntime: the entry point UI pages and data-fetch helpers call.
//!
//! Holds no tenant. Every scoped operation takes the tenant (or a
//! `TenantContext`) as an argument, so a stale tenant from a previous view
//! can never leak into a query.

use std::sync::Arc;

use harambee_core::config::HarambeeConfig;
use harambee_core::policy::{resolve_access, AccessDescriptor};
use harambee_core::traits::{Clock, KeyValueStore, RowStore, SelectQuery};
use harambee_core::types::{Notification, ProjectReference, TenantContext, TenantFeatures};
use harambee_core::{MemberId, ModuleKey, PageKey, ProjectId, RoleClaim, TenantId};
use tracing::{debug, info, warn};

use crate::errors::{AccessError, AccessResult};
use crate::fixtures::{FixtureSet, ProjectSummary};
use crate::reminders::{group_by_day, DaySection, PollPlan, ReminderGate};
use crate::schema::FallbackState;
use crate::scope::{apply_tenant_filter, not_found, TenantScopeGuard, PROJECTS_RELATION};

pub struct AccessRuntime {
    config: HarambeeConfig,
    rows: Arc<dyn RowStore>,
    clock: Arc<dyn Clock>,
    guard: TenantScopeGuard,
    reminders: ReminderGate,
    /// Schema downgrade flag; per instance, never global.
    fallback: FallbackState,
    fixtures: FixtureSet,
}

impl AccessRuntime {
    pub fn new(
        config: HarambeeConfig,
        rows: Arc<dyn RowStore>,
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> AccessResult<Self> {
        config.validate()?;
        let fixtures = FixtureSet::embedded()?;
        let fallback = FallbackState::new(config.fallback_permitted());
        let guard = TenantScopeGuard::new(Arc::clone(&rows), config.known_modules());
        let reminders = ReminderGate::new(kv, Arc::clone(&clock));

        info!(
            environment = %config.environment,
            fallback_permitted = fallback.is_permitted(),
            modules = guard.known_modules().len(),
            "Access runtime initialized"
        );

        Ok(Self {
            config,
            rows,
            clock,
            guard,
            reminders,
            fallback,
            fixtures,
        })
    }

    /// Replace the static fallback data.
    pub fn with_fixtures(mut self, fixtures: FixtureSet) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn config(&self) -> &HarambeeConfig {
        &self.config
    }

    // ---- policy ----

    pub fn get_role_access(
        &self,
        role: &str,
        project_modules: &[ModuleKey],
        features: &TenantFeatures,
    ) -> AccessDescriptor {
        self.resolve_claim(&RoleClaim::parse(role), project_modules, features)
    }

    /// Access for the role and features carried by `ctx`.
    pub fn access_for(&self, ctx: &TenantContext, project_modules: &[ModuleKey]) -> AccessDescriptor {
        self.resolve_claim(&ctx.role, project_modules, &ctx.features)
    }

    fn resolve_claim(
        &self,
        claim: &RoleClaim,
        project_modules: &[ModuleKey],
        features: &TenantFeatures,
    ) -> AccessDescriptor {
        if let RoleClaim::Unrecognized(raw) = claim {
            debug!(role = %raw, "Unrecognized role; resolving as member");
        }
        resolve_access(claim, project_modules, features)
    }

    pub fn is_admin_role(&self, role: &str) -> bool {
        harambee_core::policy::is_admin_role(role)
    }

    pub fn can_navigate(&self, descriptor: &AccessDescriptor, page: &PageKey) -> bool {
        let allowed = descriptor.allows(page);
        if !allowed {
            debug!(page = %page, "Navigation denied");
        }
        allowed
    }

    // ---- tenant scope ----

    pub fn apply_tenant_filter(&self, query: SelectQuery, tenant: Option<&TenantId>) -> SelectQuery {
        apply_tenant_filter(query, tenant)
    }

    /// Resolve a project reference within `ctx.tenant_id`.
    ///
    /// While schema fallback is active the fixture set answers instead of the
    /// store. A structural store failure engages fallback (outside production)
    /// and is answered from fixtures; anything else propagates.
    pub fn resolve_project_id(
        &self,
        reference: &ProjectReference,
        ctx: &TenantContext,
    ) -> AccessResult<ProjectId> {
        if let Some(id) = reference.as_id() {
            return Ok(id);
        }
        if self.fallback.is_active() {
            return self.resolve_from_fixtures(reference, &ctx.tenant_id);
        }
        match self.guard.resolve_project_id(reference, &ctx.tenant_id) {
            Err(AccessError::Store(e)) if self.fallback.mark_schema_unavailable(&e) => {
                self.resolve_from_fixtures(reference, &ctx.tenant_id)
            }
            other => other,
        }
    }

    /// `resolve_project_id` for a raw string (`"42"`, `"jpp"`, `"well-1"`).
    pub fn resolve_project_ref(&self, raw: &str, ctx: &TenantContext) -> AccessResult<ProjectId> {
        self.resolve_project_id(&self.guard.parse_reference(raw), ctx)
    }

    fn resolve_from_fixtures(
        &self,
        reference: &ProjectReference,
        tenant: &TenantId,
    ) -> AccessResult<ProjectId> {
        debug!(reference = %reference, tenant = %tenant, "Resolving project from fixtures");
        self.fixtures
            .resolve(reference, tenant)
            .ok_or_else(|| not_found(reference))
    }

    /// The tenant's projects by display order, from the store or, while
    /// fallback is active, from fixtures.
    pub fn list_projects(&self, ctx: &TenantContext) -> AccessResult<Vec<ProjectSummary>> {
        let query = SelectQuery::table(PROJECTS_RELATION)
            .select(&["id", "tenant_id", "code", "name", "display_order"])
            .order_by("display_order", true)
            .order_by("created_at", true);
        let query = apply_tenant_filter(query, Some(&ctx.tenant_id));

        let live = self
            .fallback
            .read_or_fallback(|| self.rows.select(&query).map(Some), || None)?;
        match live {
            Some(rows) => rows.into_iter().map(ProjectSummary::from_row).collect(),
            None => Ok(self.fixtures.projects_for(&ctx.tenant_id)),
        }
    }

    // ---- schema fallback ----

    /// Signals the store is reachable and current; clears schema fallback.
    pub fn on_authenticated_success(&self) {
        self.fallback.reset();
    }

    pub fn fallback_active(&self) -> bool {
        self.fallback.is_active()
    }

    // ---- reminders ----

    pub fn should_refresh_reminders(&self, tenant: &TenantId, member: &MemberId, force: bool) -> bool {
        self.reminders
            .should_refresh(tenant, member, self.config.reminders.effective_interval(), force)
    }

    pub fn record_reminder_refresh(&self, tenant: &TenantId, member: &MemberId) -> AccessResult<()> {
        self.reminders.record_refreshed(tenant, member).map_err(|source| {
            warn!(tenant = %tenant, member = %member, error = %source, "Failed to record reminder refresh");
            AccessError::ThrottleWrite { source }
        })
    }

    /// Compare-and-swap variant of `should_refresh_reminders` +
    /// `record_reminder_refresh` for callers that must not double-refresh.
    pub fn try_claim_reminder_refresh(
        &self,
        tenant: &TenantId,
        member: &MemberId,
        force: bool,
    ) -> AccessResult<bool> {
        Ok(self.reminders.try_claim_refresh(
            tenant,
            member,
            self.config.reminders.effective_interval(),
            force,
        )?)
    }

    pub fn group_notifications_by_day(
        &self,
        notifications: impl IntoIterator<Item = Notification>,
    ) -> Vec<DaySection> {
        group_by_day(notifications, self.clock.now())
    }

    pub fn poll_plan(&self) -> PollPlan {
        PollPlan::from_config(&self.config.reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use harambee_core::config::Environment;
    use harambee_core::errors::StoreError;
    use harambee_core::traits::test_helpers::{FixedClock, MemoryKeyValueStore, ScriptedRowStore};

    struct Harness {
        rows: Arc<ScriptedRowStore>,
        clock: Arc<FixedClock>,
        runtime: AccessRuntime,
    }

    fn harness(environment: Environment) -> Harness {
        let rows = Arc::new(ScriptedRowStore::new());
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()));
        let config = HarambeeConfig {
            environment,
            ..Default::default()
        };
        let runtime = AccessRuntime::new(
            config,
            rows.clone(),
            Arc::new(MemoryKeyValueStore::new()),
            clock.clone(),
        )
        .unwrap();
        Harness { rows, clock, runtime }
    }

    fn drift() -> StoreError {
        StoreError::MissingRelation {
            relation: "projects".into(),
        }
    }

    #[test]
    fn test_numeric_reference_skips_store() {
        let h = harness(Environment::Development);
        let ctx = TenantContext::new("demo", "member");
        assert_eq!(h.runtime.resolve_project_ref("42", &ctx).unwrap(), ProjectId(42));
        assert!(h.rows.queries().is_empty());
    }

    #[test]
    fn test_drift_engages_fixtures_outside_production() {
        let h = harness(Environment::Development);
        let ctx = TenantContext::new("demo", "member");
        h.rows.push_response(Err(drift()));

        assert_eq!(h.runtime.resolve_project_ref("jpp", &ctx).unwrap(), ProjectId(9001));
        assert!(h.runtime.fallback_active());

        // Served from fixtures without touching the store.
        assert_eq!(h.runtime.resolve_project_ref("jgf", &ctx).unwrap(), ProjectId(9002));
        assert_eq!(h.rows.queries().len(), 1);

        h.runtime.on_authenticated_success();
        assert!(!h.runtime.fallback_active());
    }

    #[test]
    fn test_fixture_lookup_stays_in_tenant() {
        let h = harness(Environment::Development);
        h.rows.push_response(Err(drift()));
        let other = TenantContext::new("elsewhere", "member");

        let err = h.runtime.resolve_project_ref("WELL", &other).unwrap_err();
        assert_eq!(err.to_string(), "Project not found for code WELL");
    }

    #[test]
    fn test_production_propagates_drift() {
        let h = harness(Environment::Production);
        let ctx = TenantContext::new("demo", "member");
        h.rows.push_response(Err(drift()));

        let err = h.runtime.resolve_project_ref("jpp", &ctx).unwrap_err();
        assert!(matches!(err, AccessError::Store(StoreError::MissingRelation { .. })));
        assert!(!h.runtime.fallback_active());
    }

    #[test]
    fn test_list_projects_falls_back() {
        let h = harness(Environment::Staging);
        let ctx = TenantContext::new("demo", "admin");
        h.rows.push_response(Err(drift()));

        let projects = h.runtime.list_projects(&ctx).unwrap();
        let codes: Vec<&str> = projects.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["JPP", "JGF", "WELL"]);
    }

    #[test]
    fn test_unrecognized_role_resolves_as_member() {
        let h = harness(Environment::Development);
        let access = h.runtime.get_role_access("treasurer", &[], &TenantFeatures::all_enabled());
        let member = h.runtime.get_role_access("member", &[], &TenantFeatures::all_enabled());
        assert_eq!(access, member);
        assert!(h.runtime.can_navigate(&access, &PageKey::Welfare));
        assert!(!h.runtime.can_navigate(&access, &PageKey::Settings));
    }

    #[test]
    fn test_reminder_throttle_uses_configured_interval() {
        let h = harness(Environment::Development);
        let (t, m) = (TenantId::new("demo"), MemberId::new("m1"));

        assert!(h.runtime.should_refresh_reminders(&t, &m, false));
        h.runtime.record_reminder_refresh(&t, &m).unwrap();
        assert!(!h.runtime.should_refresh_reminders(&t, &m, false));

        h.clock.advance(Duration::minutes(15));
        assert!(h.runtime.should_refresh_reminders(&t, &m, false));
    }
}
