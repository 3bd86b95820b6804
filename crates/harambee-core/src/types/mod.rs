//! Shared value types: identifiers, roles, modules, pages, tenant context,
//! project references, and notifications.

pub mod features;
pub mod identifiers;
pub mod modules;
pub mod notifications;
pub mod pages;
pub mod references;
pub mod roles;
pub mod tenant;

pub use features::{Feature, TenantFeatures};
pub use identifiers::{MemberId, ProjectId, TenantId};
pub use modules::ModuleKey;
pub use notifications::{Notification, NotificationStatus};
pub use pages::PageKey;
pub use references::ProjectReference;
pub use roles::{Role, RoleClaim};
pub use tenant::TenantContext;
