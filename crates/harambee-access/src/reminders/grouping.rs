//! Day bucketing of notifications.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use harambee_core::types::Notification;
use serde::Serialize;

/// Label format for days before yesterday, e.g. `Mon, 2 Mar 2026`.
pub const DATE_LABEL_FORMAT: &str = "%a, %-d %b %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum DayBucket {
    Day(NaiveDate),
    /// Items whose timestamp could not be parsed.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySection {
    pub bucket: DayBucket,
    pub label: String,
    pub items: Vec<Notification>,
}

/// Group by calendar day in the local time zone.
pub fn group_by_day(
    notifications: impl IntoIterator<Item = Notification>,
    now: DateTime<Utc>,
) -> Vec<DaySection> {
    group_by_day_in(notifications, now, &Local)
}

/// Group by calendar day in `tz`. Sections are newest day first with the
/// unknown bucket last; items keep their input order within a section.
pub fn group_by_day_in<Tz: TimeZone>(
    notifications: impl IntoIterator<Item = Notification>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<DaySection> {
    let today = now.with_timezone(tz).date_naive();
    let mut days: BTreeMap<NaiveDate, Vec<Notification>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for notification in notifications {
        match notification.parsed_created_at() {
            Some(at) => days
                .entry(at.with_timezone(tz).date_naive())
                .or_default()
                .push(notification),
            None => unknown.push(notification),
        }
    }

    let mut sections: Vec<DaySection> = days
        .into_iter()
        .rev()
        .map(|(day, items)| DaySection {
            bucket: DayBucket::Day(day),
            label: day_label(day, today),
            items,
        })
        .collect();

    if !unknown.is_empty() {
        sections.push(DaySection {
            bucket: DayBucket::Unknown,
            label: "Unknown date".to_string(),
            items: unknown,
        });
    }
    sections
}

fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format(DATE_LABEL_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use harambee_core::types::NotificationStatus;

    fn note(id: &str, created_at: &str) -> Notification {
        Notification {
            id: id.into(),
            created_at: created_at.into(),
            kind: "task_assigned".into(),
            status: NotificationStatus::Unread,
            title: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
    }

    fn ids(section: &DaySection) -> Vec<&str> {
        section.items.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_today_before_yesterday_preserving_order() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let sections = group_by_day_in(
            vec![
                note("a", "2026-03-04T08:00:00Z"),
                note("y", "2026-03-03T22:00:00Z"),
                note("b", "2026-03-04T11:00:00Z"),
            ],
            now(),
            &utc,
        );
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, "Today");
        assert_eq!(ids(&sections[0]), vec!["a", "b"]);
        assert_eq!(sections[1].label, "Yesterday");
        assert_eq!(ids(&sections[1]), vec!["y"]);
    }

    #[test]
    fn test_unparsable_goes_to_final_bucket() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let sections = group_by_day_in(
            vec![
                note("bad", "not a date"),
                note("old", "2026-02-26T10:00:00Z"),
                note("today", "2026-03-04T09:00:00Z"),
            ],
            now(),
            &utc,
        );
        let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Thu, 26 Feb 2026", "Unknown date"]);
        assert_eq!(sections[2].bucket, DayBucket::Unknown);
        assert_eq!(ids(&sections[2]), vec!["bad"]);
    }

    #[test]
    fn test_day_boundary_follows_time_zone() {
        // 22:30 UTC on the 3rd is already the 4th in UTC+3.
        let nairobi = FixedOffset::east_opt(3 * 3600).unwrap();
        let sections = group_by_day_in(vec![note("late", "2026-03-03T22:30:00Z")], now(), &nairobi);
        assert_eq!(sections[0].label, "Today");

        let utc = FixedOffset::east_opt(0).unwrap();
        let sections = group_by_day_in(vec![note("late", "2026-03-03T22:30:00Z")], now(), &utc);
        assert_eq!(sections[0].label, "Yesterday");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_day(Vec::new(), now()).is_empty());
    }
}
