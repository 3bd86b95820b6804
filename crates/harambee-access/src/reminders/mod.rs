//! Reminder refresh throttling and notification display helpers.

pub mod gate;
pub mod grouping;
pub mod kinds;
pub mod polling;

pub use gate::{throttle_key, ReminderGate};
pub use grouping::{group_by_day, group_by_day_in, DayBucket, DaySection};
pub use kinds::NotificationKind;
pub use polling::{count_unread, PollPlan, ViewLifetime, ViewToken};
