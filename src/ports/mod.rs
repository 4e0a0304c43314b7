//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Wizard Collaborators
//!
//! - `KeyValueStore` - Persistence bridge for everything remembered locally
//! - `StepRenderer` - Turns step views into screens
//! - `Announcer` - Live-region announcements
//! - `AuthCapability` - Whether the visitor is signed in
//! - `DocumentExportService` - Markdown to HTML/PDF conversion
//! - `SubscriptionSink` - Newsletter sign-ups

mod announcer;
mod auth_capability;
mod document_export_service;
mod event_publisher;
mod event_subscriber;
mod key_value_store;
mod step_renderer;
mod subscription_sink;

pub use announcer::Announcer;
pub use auth_capability::{AuthCallback, AuthCapability, AuthError};
pub use document_export_service::{DocumentExportService, ExportError, ExportFormat, ExportedDocument};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use key_value_store::{storage_keys, KeyValueStore, KeyValueStoreExt, StorageError};
pub use step_renderer::{RenderError, Screen, StepRenderer};
pub use subscription_sink::{SinkError, SubscriptionOutcome, SubscriptionSink};
