//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `storage` - key-value persistence bridge (in-memory, JSON file)
//! - `events` - in-process event bus and the step-change logger
//! - `announcer` - live-region announcements (tracing, recording)
//! - `auth` - local-flag authentication with a readiness handshake
//! - `render` - plain-text step renderer
//! - `document` - Markdown to HTML/PDF conversion
//! - `newsletter` - in-memory subscription sink
//! - `http` - axum routers

pub mod announcer;
pub mod auth;
pub mod document;
pub mod events;
pub mod http;
pub mod newsletter;
pub mod render;
pub mod storage;

pub use announcer::{RecordingAnnouncer, TracingAnnouncer};
pub use auth::{AuthReadiness, LocalFlagAuth};
pub use document::PulldownExportService;
pub use events::{InMemoryEventBus, StepChangeLogger, STEP_CHANGED};
pub use newsletter::InMemorySubscriptionSink;
pub use render::TextStepRenderer;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
