//! Display classification of notification types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Task,
    Meeting,
    News,
    System,
}

impl NotificationKind {
    /// Classify by `task_` / `meeting_` / `news_` prefix; anything else is
    /// `System`. Display only.
    pub fn classify(kind: &str) -> Self {
        let kind = kind.trim().to_ascii_lowercase();
        let matches = |prefix: &str| kind == prefix || kind.starts_with(&format!("{prefix}_"));
        if matches("task") {
            Self::Task
        } else if matches("meeting") {
            Self::Meeting
        } else if matches("news") {
            Self::News
        } else {
            Self::System
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Meeting => "meeting",
            Self::News => "news",
            Self::System => "system",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let cases = [
            ("task_assigned", NotificationKind::Task),
            ("TASK_DUE", NotificationKind::Task),
            ("meeting_scheduled", NotificationKind::Meeting),
            ("news_posted", NotificationKind::News),
            ("news", NotificationKind::News),
            ("taskforce_update", NotificationKind::System),
            ("contribution_received", NotificationKind::System),
            ("", NotificationKind::System),
        ];
        for (raw, expected) in cases {
            assert_eq!(NotificationKind::classify(raw), expected, "{raw}");
        }
    }
}
