//! Reminder throttling and notification polling.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default minimum gap between reminder recomputations for one member.
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u64 = 15;
/// Default unread-count poll period.
pub const DEFAULT_UNREAD_POLL_SECONDS: u64 = 60;
/// Upper clamp for both periods (one year).
const MAX_PERIOD_SECONDS: u64 = 366 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReminderConfig {
    /// Minutes between reminder refreshes. Default: 15.
    pub interval_minutes: Option<u64>,
    /// Seconds between unread-count polls. Default: 60.
    pub unread_poll_seconds: Option<u64>,
}

impl ReminderConfig {
    pub fn effective_interval(&self) -> Duration {
        let minutes = self.interval_minutes.unwrap_or(DEFAULT_REMINDER_INTERVAL_MINUTES);
        Duration::seconds(clamp_seconds(minutes.saturating_mul(60)))
    }

    pub fn effective_unread_poll(&self) -> Duration {
        let seconds = self.unread_poll_seconds.unwrap_or(DEFAULT_UNREAD_POLL_SECONDS);
        Duration::seconds(clamp_seconds(seconds))
    }
}

fn clamp_seconds(seconds: u64) -> i64 {
    // MAX_PERIOD_SECONDS fits in i64.
    seconds.min(MAX_PERIOD_SECONDS) as i64
}
