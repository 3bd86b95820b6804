//! Property tests for role policy resolution.

use proptest::prelude::*;

use harambee_core::policy::{get_access, is_admin_role};
use harambee_core::types::features::{Feature, TenantFeatures};
use harambee_core::{ModuleKey, PageKey};

fn role_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("member".to_string()),
        Just("project_manager".to_string()),
        Just("supervisor".to_string()),
        Just("admin".to_string()),
        Just("superadmin".to_string()),
        Just("SUPERVISOR".to_string()),
        "[a-zA-Z_]{0,12}",
    ]
}

fn modules_strategy() -> impl Strategy<Value = Vec<ModuleKey>> {
    prop::collection::vec("[a-z]{2,6}", 0..4)
        .prop_map(|keys| keys.iter().filter_map(|k| ModuleKey::parse(k)).collect())
}

fn features_strategy() -> impl Strategy<Value = TenantFeatures> {
    prop::collection::vec(any::<bool>(), Feature::ALL.len()).prop_map(|switches| {
        Feature::ALL
            .iter()
            .zip(switches)
            .filter(|(_, on)| !on)
            .fold(TenantFeatures::all_enabled(), |acc, (f, _)| acc.disable(*f))
    })
}

proptest! {
    #[test]
    fn prop_default_page_is_allowed(
        role in role_strategy(),
        modules in modules_strategy(),
        features in features_strategy(),
    ) {
        let access = get_access(&role, &modules, &features);
        prop_assert!(access.allowed_pages.contains(&access.default_page));
    }

    #[test]
    fn prop_resolution_is_deterministic(
        role in role_strategy(),
        modules in modules_strategy(),
        features in features_strategy(),
    ) {
        prop_assert_eq!(
            get_access(&role, &modules, &features),
            get_access(&role, &modules, &features)
        );
    }

    #[test]
    fn prop_case_does_not_matter(
        role in role_strategy(),
        modules in modules_strategy(),
    ) {
        let features = TenantFeatures::all_enabled();
        prop_assert_eq!(
            get_access(&role.to_lowercase(), &modules, &features),
            get_access(&role.to_uppercase(), &modules, &features)
        );
    }

    #[test]
    fn prop_module_pages_match_module_set(
        role in role_strategy(),
        modules in modules_strategy(),
        features in features_strategy(),
    ) {
        let access = get_access(&role, &modules, &features);
        for page in &access.allowed_pages {
            if let PageKey::ProjectModule(m) = page {
                prop_assert!(access.allowed_project_modules.contains(m));
            }
        }
    }

    #[test]
    fn prop_admins_always_see_builtins(modules in modules_strategy()) {
        for role in ["admin", "superadmin"] {
            prop_assert!(is_admin_role(role));
            let access = get_access(role, &modules, &TenantFeatures::all_enabled());
            for builtin in ModuleKey::builtins() {
                prop_assert!(access.allowed_project_modules.contains(&builtin));
                prop_assert!(access.allowed_pages.contains(&PageKey::ProjectModule(builtin)));
            }
        }
    }
}
