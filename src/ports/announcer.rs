//! Announcer port - assistive-technology live-region output.

use crate::domain::announcement::Announcement;

/// Fire-and-forget channel for screen-reader announcements.
///
/// Implementations must not block and must not fail; there is no
/// acknowledgment.
pub trait Announcer: Send + Sync {
    fn announce(&self, announcement: Announcement);
}
