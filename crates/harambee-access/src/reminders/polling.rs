//! Background polling for a notification view.
//!
//! A view polls the unread count on a short period and asks the reminder
//! gate on a longer one. Results that arrive after the view is torn down are
//! dropped through `ViewToken::deliver`; in-flight work is not cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use harambee_core::config::ReminderConfig;
use harambee_core::types::Notification;

/// Owned by the view. Dropping or calling `unmount` invalidates every token.
#[derive(Debug)]
pub struct ViewLifetime {
    mounted: Arc<AtomicBool>,
}

/// Handed to pollers; cheap to clone.
#[derive(Debug, Clone)]
pub struct ViewToken {
    mounted: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> ViewToken {
        ViewToken {
            mounted: Arc::clone(&self.mounted),
        }
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl ViewToken {
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// `Some(value)` while the view is mounted, `None` after.
    pub fn deliver<T>(&self, value: T) -> Option<T> {
        self.is_mounted().then_some(value)
    }
}

/// Poll periods for one notification view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    pub unread_every: Duration,
    pub reminders_every: Duration,
}

impl PollPlan {
    pub fn from_config(config: &ReminderConfig) -> Self {
        Self {
            unread_every: config.effective_unread_poll(),
            reminders_every: config.effective_interval(),
        }
    }

    /// Whether an unread-count poll is due.
    pub fn unread_due(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        last.map_or(true, |last| now - last >= self.unread_every)
    }
}

pub fn count_unread(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.is_unread()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_token_stops_delivering_after_unmount() {
        let view = ViewLifetime::new();
        let token = view.token();
        assert_eq!(token.deliver(3), Some(3));
        view.unmount();
        assert_eq!(token.deliver(3), None);
    }

    #[test]
    fn test_drop_unmounts() {
        let token = {
            let view = ViewLifetime::new();
            view.token()
        };
        assert!(!token.is_mounted());
    }

    #[test]
    fn test_default_plan() {
        let plan = PollPlan::from_config(&ReminderConfig::default());
        assert_eq!(plan.unread_every, Duration::seconds(60));
        assert_eq!(plan.reminders_every, Duration::minutes(15));
    }

    #[test]
    fn test_unread_due() {
        let plan = PollPlan::from_config(&ReminderConfig::default());
        let t0 = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        assert!(plan.unread_due(None, t0));
        assert!(!plan.unread_due(Some(t0), t0 + Duration::seconds(59)));
        assert!(plan.unread_due(Some(t0), t0 + Duration::seconds(60)));
    }
}
