//! Announcer adapters.

mod recording_announcer;
mod tracing_announcer;

pub use recording_announcer::RecordingAnnouncer;
pub use tracing_announcer::TracingAnnouncer;
