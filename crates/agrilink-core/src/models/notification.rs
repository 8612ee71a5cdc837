//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const HIGH_PRIORITY_MARKERS: [&str; 3] = ["urgent", "emergency", "critical"];
const MEDIUM_PRIORITY_MARKERS: [&str; 3] = ["escalat", "diagnos", "assigned"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "user")]
    pub user_id: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default, alias = "reportId")]
    pub related_report: Option<String>,
}

/// Display priority derived from the message text; not stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

impl NotificationPriority {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Notification {
    #[must_use]
    pub fn priority(&self) -> NotificationPriority {
        priority_for_message(&self.message)
    }
}

/// Keyword heuristic over the lowercased message.
#[must_use]
pub fn priority_for_message(message: &str) -> NotificationPriority {
    let lowered = message.to_lowercase();
    if HIGH_PRIORITY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        NotificationPriority::High
    } else if MEDIUM_PRIORITY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        NotificationPriority::Medium
    } else {
        NotificationPriority::Low
    }
}

/// Read-state filter used by paginated notification lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ReadFilter {
    /// Value for the `read` query parameter, if any.
    #[must_use]
    pub const fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Unread => Some("false"),
            Self::Read => Some("true"),
        }
    }
}
