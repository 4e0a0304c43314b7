//! LiveRegion - one assessment's recent announcements.
//!
//! Wraps the shared announcer: every message is still forwarded, and the
//! latest few are kept so the HTTP state can carry them to the page.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::announcement::Announcement;
use crate::ports::Announcer;

const DEFAULT_CAPACITY: usize = 20;

pub struct LiveRegion {
    inner: Arc<dyn Announcer>,
    recent: Mutex<VecDeque<Announcement>>,
    capacity: usize,
}

impl LiveRegion {
    pub fn new(inner: Arc<dyn Announcer>) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: Arc<dyn Announcer>, capacity: usize) -> Self {
        Self {
            inner,
            recent: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Announcements still held, oldest first.
    pub fn recent(&self) -> Vec<Announcement> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Announcement>> {
        self.recent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Announcer for LiveRegion {
    fn announce(&self, announcement: Announcement) {
        {
            let mut recent = self.lock();
            if recent.len() == self.capacity {
                recent.pop_front();
            }
            recent.push_back(announcement.clone());
        }
        self.inner.announce(announcement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::announcer::RecordingAnnouncer;

    #[test]
    fn forwards_and_keeps_latest() {
        let shared = Arc::new(RecordingAnnouncer::new());
        let region = LiveRegion::with_capacity(shared.clone(), 2);

        region.announce(Announcement::polite("one"));
        region.announce(Announcement::polite("two"));
        region.announce(Announcement::assertive("three"));

        let kept: Vec<String> = region.recent().into_iter().map(|a| a.message).collect();
        assert_eq!(kept, vec!["two", "three"]);
        assert_eq!(shared.history().len(), 3);
    }

    #[test]
    fn regions_do_not_share_history() {
        let shared = Arc::new(RecordingAnnouncer::new());
        let first = LiveRegion::new(shared.clone());
        let second = LiveRegion::new(shared);

        first.announce(Announcement::polite("only here"));

        assert_eq!(first.recent().len(), 1);
        assert!(second.recent().is_empty());
    }
}
