//! # harambee-access
//!
//! Tenant-scoped, schema-resilient data access for the Harambee workspace.
//!
//! - `scope`: mandatory tenant predicate, project reference resolution with
//!   the `module_key` → `code` column fallback
//! - `schema`: schema drift classification and the per-instance fallback flag
//! - `reminders`: reminder refresh throttle, day grouping, notification kinds,
//!   view-lifetime polling
//! - `fixtures`: static project data served while fallback is active
//! - `runtime`: `AccessRuntime`, the façade over all of the above

pub mod errors;
pub mod fixtures;
pub mod reminders;
pub mod runtime;
pub mod schema;
pub mod scope;

pub use errors::{AccessError, AccessResult, RecoveryAction};
pub use reminders::{DaySection, NotificationKind};
pub use runtime::AccessRuntime;
pub use schema::{is_missing_column_error, is_missing_relation_error, FallbackState};
pub use scope::{apply_tenant_filter, TenantScopeGuard};
