//! Notifications as delivered by the notifications table. Consumed for
//! display grouping only; this crate never writes them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Raw creation timestamp (RFC 3339). Kept unparsed: rows with a broken
    /// timestamp must still be displayed.
    pub created_at: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: NotificationStatus,
    #[serde(default)]
    pub title: String,
}

impl Notification {
    pub fn parsed_created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.created_at.trim()).ok()
    }

    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}
