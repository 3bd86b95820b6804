//! RecoveryAction: what a caller should do when an access operation fails.
//! The layer itself never retries.

use std::fmt;

use harambee_core::errors::StoreError;

use super::AccessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Transient failure (lock contention, remote 5xx).
    Retry,
    /// Serve static fixture data (schema drift, non-production only).
    Fallback,
    /// Surface to the user; cannot be handled silently.
    Escalate,
    /// Best-effort operation; safe to drop.
    Ignore,
}

impl RecoveryAction {
    pub fn for_error(error: &AccessError) -> Self {
        match error {
            AccessError::NotFound(_) => Self::Escalate,
            AccessError::Store(e) => Self::for_store_error(e),
            // Reminder refresh is idempotent; a lost timestamp only costs an extra refresh.
            AccessError::ThrottleWrite { .. } => Self::Ignore,
            AccessError::Fixture(_) => Self::Escalate,
            AccessError::Config(_) => Self::Escalate,
        }
    }

    pub fn for_store_error(error: &StoreError) -> Self {
        match error {
            StoreError::Busy => Self::Retry,
            StoreError::MissingColumn { .. } | StoreError::MissingRelation { .. } => Self::Fallback,
            StoreError::Remote(remote) => match remote.status {
                Some(status) if status >= 500 => Self::Retry,
                Some(status) if (400..500).contains(&status) => Self::Fallback,
                _ => Self::Escalate,
            },
            StoreError::InvalidQuery(_) => Self::Escalate,
            StoreError::Backend { .. } => Self::Escalate,
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry => write!(f, "Retry"),
            Self::Fallback => write!(f, "Fallback"),
            Self::Escalate => write!(f, "Escalate"),
            Self::Ignore => write!(f, "Ignore"),
        }
    }
}
