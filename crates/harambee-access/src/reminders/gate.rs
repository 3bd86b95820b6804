//! Per (tenant, member) reminder refresh throttle.
//!
//! The record is `reminders:last_refresh:<tenant>:<member>` → epoch
//! milliseconds, overwritten after each refresh and never deleted. `%` and
//! `:` inside ids are percent-escaped so each (tenant, member) pair owns
//! exactly one key.
//!
//! `should_refresh` + `record_refreshed` is read-decide-write and not atomic:
//! two sessions of one member can both see a stale record and both refresh.
//! The refresh recomputes rather than duplicates, so this is tolerated.
//! `try_claim_refresh` closes the window with a compare-and-swap for callers
//! that need it.

use std::sync::Arc;

use chrono::Duration;
use harambee_core::errors::StoreResult;
use harambee_core::traits::{Clock, KeyValueStore};
use harambee_core::{MemberId, TenantId};
use tracing::{debug, warn};

const KEY_PREFIX: &str = "reminders:last_refresh";

pub fn throttle_key(tenant: &TenantId, member: &MemberId) -> String {
    format!(
        "{KEY_PREFIX}:{}:{}",
        escape_component(tenant.as_str()),
        escape_component(member.as_str())
    )
}

fn escape_component(raw: &str) -> String {
    raw.replace('%', "%25").replace(':', "%3A")
}

pub struct ReminderGate {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

/// What the stored record says.
enum LastRefresh {
    Never,
    At(i64),
    /// Present but not a millisecond timestamp. Raw value kept for CAS.
    Unreadable(String),
}

impl ReminderGate {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    fn read(&self, key: &str) -> StoreResult<(Option<String>, LastRefresh)> {
        let raw = self.store.get(key)?;
        let last = match raw.as_deref() {
            None => LastRefresh::Never,
            Some(value) => match value.trim().parse::<i64>() {
                Ok(ms) => LastRefresh::At(ms),
                Err(_) => LastRefresh::Unreadable(value.to_string()),
            },
        };
        Ok((raw, last))
    }

    fn due(&self, key: &str, last: &LastRefresh, interval: Duration, now_ms: i64) -> bool {
        match last {
            LastRefresh::Never => true,
            LastRefresh::Unreadable(raw) => {
                warn!(key, value = %raw, "Unparsable reminder throttle record; refreshing");
                true
            }
            LastRefresh::At(last_ms) => {
                let elapsed = now_ms.saturating_sub(*last_ms);
                if elapsed < interval.num_milliseconds() {
                    debug!(key, elapsed_ms = elapsed, "Reminder refresh throttled");
                    false
                } else {
                    debug!(key, elapsed_ms = elapsed, "Reminder refresh due");
                    true
                }
            }
        }
    }

    /// Whether enough time has passed since the last recorded refresh.
    ///
    /// Never fails: an unreadable store or record means "proceed".
    pub fn should_refresh(
        &self,
        tenant: &TenantId,
        member: &MemberId,
        interval: Duration,
        force: bool,
    ) -> bool {
        if force {
            return true;
        }
        let key = throttle_key(tenant, member);
        match self.read(&key) {
            Ok((_, last)) => self.due(&key, &last, interval, self.now_ms()),
            Err(e) => {
                warn!(key = %key, error = %e, "Reminder throttle record unreadable; refreshing");
                true
            }
        }
    }

    /// Persist now as the last refresh time.
    pub fn record_refreshed(&self, tenant: &TenantId, member: &MemberId) -> StoreResult<()> {
        self.store
            .set(&throttle_key(tenant, member), &self.now_ms().to_string())
    }

    /// Atomically decide and record. Returns `true` only for the one caller
    /// whose compare-and-swap lands; that caller owns the refresh.
    pub fn try_claim_refresh(
        &self,
        tenant: &TenantId,
        member: &MemberId,
        interval: Duration,
        force: bool,
    ) -> StoreResult<bool> {
        let key = throttle_key(tenant, member);
        let (raw, last) = self.read(&key)?;
        let now_ms = self.now_ms();
        if !force && !self.due(&key, &last, interval, now_ms) {
            return Ok(false);
        }
        let claimed = self
            .store
            .compare_and_swap(&key, raw.as_deref(), &now_ms.to_string())?;
        if !claimed {
            debug!(key = %key, "Reminder refresh claimed by another session");
        }
        Ok(claimed)
    }
}
