//! # harambee-core
//!
//! Foundation crate for the Harambee access layer.
//! Defines the identifiers, roles, page vocabulary, policy resolver, store
//! traits, errors, config, and tracing setup. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod errors;
pub mod policy;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::HarambeeConfig;
pub use errors::{StoreError, StoreResult};
pub use policy::{get_access, is_admin_role, AccessDescriptor};
pub use types::identifiers::{MemberId, ProjectId, TenantId};
pub use types::modules::ModuleKey;
pub use types::pages::PageKey;
pub use types::roles::{Role, RoleClaim};
