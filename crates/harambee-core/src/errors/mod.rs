//! Error types shared across the workspace.

pub mod config_error;
pub mod error_code;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::HarambeeErrorCode;
pub use store_error::{RemoteError, StoreError, StoreResult};
