//! Announcements for assistive-technology live regions.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    /// Read when the user is idle.
    Polite,
    /// Interrupts whatever is being read.
    Assertive,
}

impl fmt::Display for AnnouncementPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnouncementPriority::Polite => f.write_str("polite"),
            AnnouncementPriority::Assertive => f.write_str("assertive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub message: String,
    pub priority: AnnouncementPriority,
}

impl Announcement {
    pub fn polite(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            priority: AnnouncementPriority::Polite,
        }
    }

    pub fn assertive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            priority: AnnouncementPriority::Assertive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_value(Announcement::assertive("stop")).unwrap();
        assert_eq!(json["priority"], "assertive");
        assert_eq!(AnnouncementPriority::Polite.to_string(), "polite");
    }
}
