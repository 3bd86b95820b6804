//! Environment-scoped schema fallback flag.

use std::sync::atomic::{AtomicBool, Ordering};

use harambee_core::errors::{StoreError, StoreResult};
use tracing::{info, warn};

use super::classifier::is_structural_error;

/// Once a structural schema error is seen, reads prefer static fixture data
/// until `reset`. Never engages when constructed as not permitted
/// (production, or fallback disabled in config).
#[derive(Debug, Default)]
pub struct FallbackState {
    permitted: bool,
    active: AtomicBool,
}

impl FallbackState {
    pub fn new(permitted: bool) -> Self {
        Self {
            permitted,
            active: AtomicBool::new(false),
        }
    }

    pub fn is_permitted(&self) -> bool {
        self.permitted
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Set the flag if `error` is structural and fallback is permitted.
    /// Returns whether the flag is now set.
    pub fn mark_schema_unavailable(&self, error: &StoreError) -> bool {
        if !self.permitted {
            return false;
        }
        if is_structural_error(error) && !self.active.swap(true, Ordering::AcqRel) {
            warn!(error = %error, "Schema drift detected; serving fixture data until reset");
        }
        self.is_active()
    }

    /// Clear the flag. Returns whether it was set.
    pub fn reset(&self) -> bool {
        let was_active = self.active.swap(false, Ordering::AcqRel);
        if was_active {
            info!("Schema fallback reset");
        }
        was_active
    }

    /// Run `live` unless the flag is set. A structural failure sets the flag
    /// and serves `fallback`; any other failure propagates.
    pub fn read_or_fallback<T>(
        &self,
        live: impl FnOnce() -> StoreResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> StoreResult<T> {
        if self.is_active() {
            return Ok(fallback());
        }
        match live() {
            Ok(value) => Ok(value),
            Err(e) if self.mark_schema_unavailable(&e) => Ok(fallback()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::is_missing_relation_error;
    use harambee_core::errors::RemoteError;

    fn drift() -> StoreError {
        StoreError::MissingRelation {
            relation: "reminders".into(),
        }
    }

    #[test]
    fn test_marks_only_structural_errors() {
        let state = FallbackState::new(true);
        assert!(!state.mark_schema_unavailable(&StoreError::Busy));
        assert!(!state.is_active());
        assert!(state.mark_schema_unavailable(&drift()));
        assert!(state.is_active());
    }

    #[test]
    fn test_coded_missing_relation_engages() {
        let state = FallbackState::new(true);
        let err = StoreError::Remote(RemoteError::new("undefined table").with_code("42P01"));
        assert!(is_missing_relation_error(&err, None));
        assert!(state.mark_schema_unavailable(&err));
        assert!(state.is_active());
    }

    #[test]
    fn test_not_permitted_never_engages() {
        let state = FallbackState::new(false);
        assert!(!state.mark_schema_unavailable(&drift()));
        assert!(!state.mark_schema_unavailable(&StoreError::Remote(
            RemoteError::new("bad request").with_status(400)
        )));
        assert!(!state.is_active());
    }

    #[test]
    fn test_reset_clears() {
        let state = FallbackState::new(true);
        state.mark_schema_unavailable(&drift());
        assert!(state.reset());
        assert!(!state.is_active());
        assert!(!state.reset());
    }

    #[test]
    fn test_read_or_fallback_routes() {
        let state = FallbackState::new(true);
        assert_eq!(state.read_or_fallback(|| Ok(1), || 0).unwrap(), 1);
        assert!(matches!(
            state.read_or_fallback(|| Err::<i32, _>(StoreError::Busy), || 0),
            Err(StoreError::Busy)
        ));

        assert_eq!(state.read_or_fallback(|| Err(drift()), || 7).unwrap(), 7);
        // Flag set: live is not consulted.
        assert_eq!(
            state
                .read_or_fallback(|| -> StoreResult<i32> { panic!("live read while in fallback") }, || 8)
                .unwrap(),
            8
        );
    }

    #[test]
    fn test_instances_are_independent() {
        let a = FallbackState::new(true);
        let b = FallbackState::new(true);
        a.mark_schema_unavailable(&drift());
        assert!(a.is_active());
        assert!(!b.is_active());
    }
}
