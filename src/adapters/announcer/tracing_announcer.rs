//! Announcer that writes to the log.

use crate::domain::announcement::{Announcement, AnnouncementPriority};
use crate::ports::Announcer;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, announcement: Announcement) {
        match announcement.priority {
            AnnouncementPriority::Polite => {
                tracing::debug!(priority = "polite", text = %announcement.message, "announce")
            }
            AnnouncementPriority::Assertive => {
                tracing::info!(priority = "assertive", text = %announcement.message, "announce")
            }
        }
    }
}
