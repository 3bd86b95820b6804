//! Access-layer errors.

pub mod recovery;

use harambee_core::errors::error_code::{self, HarambeeErrorCode};
use harambee_core::errors::{ConfigError, StoreError};

pub use recovery::RecoveryAction;

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// A project reference did not resolve within the requesting tenant.
    #[error("{0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Persisting the reminder throttle timestamp failed.
    #[error("failed to record reminder refresh: {source}")]
    ThrottleWrite { source: StoreError },

    #[error("fixture data is malformed: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AccessError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The underlying store error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(e) | Self::ThrottleWrite { source: e } => Some(e),
            _ => None,
        }
    }
}

impl HarambeeErrorCode for AccessError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => error_code::NOT_FOUND,
            Self::Store(e) => e.error_code(),
            Self::ThrottleWrite { .. } => error_code::THROTTLE_WRITE_FAILED,
            Self::Fixture(_) => error_code::FIXTURE_ERROR,
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_displays_bare_message() {
        let err = AccessError::NotFound("Project not found for module jpp".into());
        assert_eq!(err.to_string(), "Project not found for module jpp");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_codes_pass_through() {
        let err = AccessError::from(StoreError::MissingRelation {
            relation: "projects".into(),
        });
        assert_eq!(err.error_code(), "SCHEMA_MISSING_RELATION");
        assert!(err.store_error().is_some());
    }
}
