//! Announcer that keeps a bounded live-region history.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::announcement::Announcement;
use crate::ports::Announcer;

const DEFAULT_CAPACITY: usize = 50;

/// Keeps the most recent announcements, oldest first.
#[derive(Debug)]
pub struct RecordingAnnouncer {
    history: Mutex<VecDeque<Announcement>>,
    capacity: usize,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn history(&self) -> Vec<Announcement> {
        self.lock().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Announcement> {
        self.lock().back().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Announcement>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RecordingAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, announcement: Announcement) {
        let mut history = self.lock();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(announcement);
    }
}
