//! Property tests for notification day grouping.

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;

use harambee_access::reminders::{group_by_day_in, DayBucket};
use harambee_core::types::{Notification, NotificationStatus};

/// `Some(minutes before now)` or `None` for an unparsable timestamp.
fn offsets_strategy() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::weighted(0.9, 0i64..(60 * 24 * 10)), 0..40)
}

fn notifications(offsets: &[Option<i64>]) -> Vec<Notification> {
    let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
    offsets
        .iter()
        .enumerate()
        .map(|(i, offset)| Notification {
            id: i.to_string(),
            created_at: match offset {
                Some(minutes) => (now - Duration::minutes(*minutes)).to_rfc3339(),
                None => format!("garbage-{i}"),
            },
            kind: "task_due".to_string(),
            status: NotificationStatus::Unread,
            title: String::new(),
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_grouping_is_a_stable_partition(offsets in offsets_strategy(), east_hours in -11i32..=12) {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let tz = FixedOffset::east_opt(east_hours * 3600).unwrap();
        let input = notifications(&offsets);
        let sections = group_by_day_in(input.clone(), now, &tz);

        let total: usize = sections.iter().map(|s| s.items.len()).sum();
        prop_assert_eq!(total, input.len());

        for section in &sections {
            prop_assert!(!section.items.is_empty());
            let ids: Vec<usize> = section.items.iter().map(|n| n.id.parse().unwrap()).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "input order lost in {}", section.label);
        }
    }

    #[test]
    fn prop_days_descend_and_unknown_is_last(offsets in offsets_strategy()) {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let sections = group_by_day_in(notifications(&offsets), now, &utc);

        let days: Vec<_> = sections
            .iter()
            .filter_map(|s| match s.bucket {
                DayBucket::Day(day) => Some(day),
                DayBucket::Unknown => None,
            })
            .collect();
        prop_assert!(days.windows(2).all(|w| w[0] > w[1]));

        let unknown_at: Vec<usize> = sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.bucket == DayBucket::Unknown)
            .map(|(i, _)| i)
            .collect();
        prop_assert!(unknown_at.len() <= 1);
        if let Some(&i) = unknown_at.first() {
            prop_assert_eq!(i, sections.len() - 1);
        }
        prop_assert_eq!(unknown_at.is_empty(), offsets.iter().all(Option::is_some));
    }
}
