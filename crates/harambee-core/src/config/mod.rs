//! Configuration loaded from `harambee.toml`.

pub mod harambee_config;
pub mod reminder_config;
pub mod schema_config;
pub mod storage_config;

pub use harambee_config::{Environment, HarambeeConfig, ModulesConfig};
pub use reminder_config::ReminderConfig;
pub use schema_config::SchemaConfig;
pub use storage_config::StorageConfig;
