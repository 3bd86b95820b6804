//! Role policy: which pages and project modules a member may reach.
//!
//! - admin / superadmin: every page, built-in modules always included
//! - supervisor: reports, expenses, meetings, documents, profile
//! - project_manager: projects and the sub-page of each accessible module
//! - member (and anything unrecognized): welfare area, meetings, documents,
//!   projects and module sub-pages
//!
//! Resolution is pure and total. Tenant feature switches then remove the
//! pages they gate; `overview` and `profile` are never gated, so a default
//! page always survives.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::features::{Feature, TenantFeatures};
use crate::types::modules::ModuleKey;
use crate::types::pages::PageKey;
use crate::types::roles::{Role, RoleClaim};

/// Resolved set of reachable pages and project modules.
///
/// Always derived from (role, modules, features); never persisted.
/// `default_page` is always a member of `allowed_pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDescriptor {
    pub allowed_pages: BTreeSet<PageKey>,
    pub default_page: PageKey,
    pub allowed_project_modules: BTreeSet<ModuleKey>,
}

impl AccessDescriptor {
    pub fn allows(&self, page: &PageKey) -> bool {
        self.allowed_pages.contains(page)
    }

    /// Check a raw page key from a navigation call. Unknown keys are denied.
    pub fn allows_key(&self, raw: &str) -> bool {
        PageKey::parse(raw).is_some_and(|page| self.allows(&page))
    }

    pub fn allows_module(&self, module: &ModuleKey) -> bool {
        self.allowed_project_modules.contains(module)
    }

    /// Where a blocked navigation lands instead.
    pub fn redirect_for(&self, page: &PageKey) -> PageKey {
        if self.allows(page) {
            page.clone()
        } else {
            self.default_page.clone()
        }
    }
}

/// Resolve access from a raw role string.
pub fn get_access(
    role: &str,
    accessible_modules: &[ModuleKey],
    features: &TenantFeatures,
) -> AccessDescriptor {
    resolve_access(&RoleClaim::parse(role), accessible_modules, features)
}

/// Resolve access for an already-parsed role claim.
pub fn resolve_access(
    claim: &RoleClaim,
    accessible_modules: &[ModuleKey],
    features: &TenantFeatures,
) -> AccessDescriptor {
    let role = claim.effective();
    let (pages, default_page, modules) = role_baseline(role, accessible_modules);
    apply_features(role, pages, default_page, modules, features)
}

/// Whether a raw role string names a full-access role.
pub fn is_admin_role(role: &str) -> bool {
    Role::from_name(role).is_some_and(|r| r.is_full_access())
}

fn module_pages(modules: &BTreeSet<ModuleKey>) -> impl Iterator<Item = PageKey> + '_ {
    modules.iter().cloned().map(PageKey::ProjectModule)
}

fn role_baseline(
    role: Role,
    accessible_modules: &[ModuleKey],
) -> (BTreeSet<PageKey>, PageKey, BTreeSet<ModuleKey>) {
    let passed: BTreeSet<ModuleKey> = accessible_modules.iter().cloned().collect();

    match role {
        Role::Admin | Role::Superadmin => {
            let mut modules: BTreeSet<ModuleKey> = ModuleKey::builtins().into_iter().collect();
            modules.extend(passed);
            let mut pages: BTreeSet<PageKey> = PageKey::STATIC.iter().cloned().collect();
            pages.extend(module_pages(&modules));
            (pages, PageKey::Overview, modules)
        }
        Role::Supervisor => {
            let pages = [
                PageKey::Reports,
                PageKey::Expenses,
                PageKey::Meetings,
                PageKey::Documents,
                PageKey::Profile,
            ]
            .into_iter()
            .collect();
            (pages, PageKey::Reports, passed)
        }
        Role::ProjectManager => {
            let mut pages: BTreeSet<PageKey> =
                [PageKey::Projects, PageKey::Profile].into_iter().collect();
            pages.extend(module_pages(&passed));
            (pages, PageKey::Projects, passed)
        }
        Role::Member => {
            let mut pages: BTreeSet<PageKey> = [
                PageKey::Welfare,
                PageKey::Payouts,
                PageKey::Contributions,
                PageKey::Meetings,
                PageKey::Documents,
                PageKey::Projects,
                PageKey::Profile,
            ]
            .into_iter()
            .collect();
            pages.extend(module_pages(&passed));
            (pages, PageKey::Welfare, passed)
        }
    }
}

/// Landing-page preference when the role default is switched off.
fn default_preference(role: Role) -> Vec<PageKey> {
    match role {
        Role::Admin | Role::Superadmin => vec![PageKey::Overview, PageKey::Profile],
        Role::Supervisor => vec![
            PageKey::Reports,
            PageKey::Expenses,
            PageKey::Meetings,
            PageKey::Documents,
            PageKey::Profile,
        ],
        Role::ProjectManager => vec![PageKey::Projects, PageKey::Profile],
        Role::Member => vec![
            PageKey::Welfare,
            PageKey::Contributions,
            PageKey::Meetings,
            PageKey::Documents,
            PageKey::Projects,
            PageKey::Profile,
        ],
    }
}

fn apply_features(
    role: Role,
    mut pages: BTreeSet<PageKey>,
    default_page: PageKey,
    mut modules: BTreeSet<ModuleKey>,
    features: &TenantFeatures,
) -> AccessDescriptor {
    pages.retain(|page| features.allows_page(page));
    if !features.is_enabled(Feature::Projects) {
        modules.clear();
    }

    let default_page = if pages.contains(&default_page) {
        default_page
    } else {
        default_preference(role)
            .into_iter()
            .find(|p| pages.contains(p))
            .unwrap_or(PageKey::Profile)
    };
    // Profile is never gated; this only matters if a role baseline omits it.
    pages.insert(default_page.clone());

    AccessDescriptor {
        allowed_pages: pages,
        default_page,
        allowed_project_modules: modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(keys: &[&str]) -> BTreeSet<PageKey> {
        keys.iter().map(|k| PageKey::parse(k).unwrap()).collect()
    }

    fn none() -> TenantFeatures {
        TenantFeatures::all_enabled()
    }

    #[test]
    fn test_admin_gets_full_page_set() {
        let access = get_access("admin", &[], &none());
        let mut expected: BTreeSet<PageKey> = PageKey::STATIC.iter().cloned().collect();
        expected.insert(PageKey::ProjectModule(ModuleKey::jpp()));
        expected.insert(PageKey::ProjectModule(ModuleKey::jgf()));
        assert_eq!(access.allowed_pages, expected);
        assert_eq!(access.default_page, PageKey::Overview);
        assert_eq!(
            access.allowed_project_modules,
            ModuleKey::builtins().into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_admin_is_case_insensitive() {
        assert_eq!(get_access("admin", &[], &none()), get_access("ADMIN", &[], &none()));
        assert_eq!(
            get_access("superadmin", &[], &none()).allowed_pages,
            get_access("Admin", &[], &none()).allowed_pages
        );
    }

    #[test]
    fn test_admin_unions_passed_modules() {
        let poultry = ModuleKey::parse("poultry").unwrap();
        let access = get_access("superadmin", &[poultry.clone()], &none());
        assert!(access.allows_module(&poultry));
        assert!(access.allows_module(&ModuleKey::jpp()));
        assert!(access.allows(&PageKey::ProjectModule(poultry)));
    }

    #[test]
    fn test_supervisor_fixed_pages() {
        let access = get_access("supervisor", &[ModuleKey::jpp()], &none());
        assert_eq!(
            access.allowed_pages,
            pages(&["reports", "expenses", "meetings", "documents", "profile"])
        );
        assert_eq!(access.default_page, PageKey::Reports);
        assert_eq!(
            access.allowed_project_modules,
            [ModuleKey::jpp()].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_project_manager_module_pages() {
        let access = get_access("project_manager", &[ModuleKey::jgf()], &none());
        assert_eq!(access.allowed_pages, pages(&["projects", "profile", "projects-jgf"]));
        assert_eq!(access.default_page, PageKey::Projects);
    }

    #[test]
    fn test_member_module_pages() {
        let with_jpp = get_access("member", &[ModuleKey::jpp()], &none());
        assert!(with_jpp.allows_key("projects-jpp"));
        assert!(!with_jpp.allows_key("projects-jgf"));

        let bare = get_access("member", &[], &none());
        assert!(!bare.allows_key("projects-jpp"));
        assert!(!bare.allows_key("projects-jgf"));
        assert_eq!(bare.default_page, PageKey::Welfare);
    }

    #[test]
    fn test_unknown_role_is_member() {
        assert_eq!(
            get_access("treasurer", &[ModuleKey::jpp()], &none()),
            get_access("member", &[ModuleKey::jpp()], &none())
        );
        assert_eq!(get_access("", &[], &none()), get_access("member", &[], &none()));
    }

    #[test]
    fn test_disabled_default_falls_back_in_preference_order() {
        let features = TenantFeatures::all_enabled().disable(Feature::Welfare);
        let access = get_access("member", &[], &features);
        assert!(!access.allows(&PageKey::Welfare));
        assert!(!access.allows(&PageKey::Payouts));
        assert_eq!(access.default_page, PageKey::Contributions);
    }

    #[test]
    fn test_projects_disabled_clears_modules() {
        let features = TenantFeatures::all_enabled().disable(Feature::Projects);
        let access = get_access("project_manager", &[ModuleKey::jgf()], &features);
        assert_eq!(access.allowed_pages, pages(&["profile"]));
        assert_eq!(access.default_page, PageKey::Profile);
        assert!(access.allowed_project_modules.is_empty());
    }

    #[test]
    fn test_admin_default_survives_every_switch() {
        let mut features = TenantFeatures::all_enabled();
        for f in Feature::ALL {
            features = features.disable(f);
        }
        let access = get_access("admin", &[], &features);
        assert_eq!(access.default_page, PageKey::Overview);
        assert!(access.allows(&PageKey::Settings));
        assert!(!access.allows(&PageKey::Reports));
    }

    #[test]
    fn test_redirect_for_blocked_page() {
        let access = get_access("supervisor", &[], &none());
        assert_eq!(access.redirect_for(&PageKey::Welfare), PageKey::Reports);
        assert_eq!(access.redirect_for(&PageKey::Meetings), PageKey::Meetings);
        assert!(!access.allows_key("reprots"));
    }

    #[test]
    fn test_is_admin_role() {
        assert!(is_admin_role("admin"));
        assert!(is_admin_role("SuperAdmin"));
        assert!(!is_admin_role("supervisor"));
        assert!(!is_admin_role("administrator"));
    }
}
