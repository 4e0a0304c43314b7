//! Application layer - orchestrates the domain through the ports.
//!
//! - `AssessmentWizard` - the navigation controller for one assessment
//! - `ExportTask` - background, cancelable results export
//! - `AssessmentRegistry` - live wizards keyed by assessment id
//! - `LiveRegion` - per-assessment announcement history
//! - `PreferencesService` / `SubscribeToNewsletterHandler` - supporting glue
//! - `AppServices` - composition of all of the above

mod export_task;
mod live_region;
mod newsletter;
mod preferences_service;
mod registry;
mod services;
mod session_store;
mod wizard;

pub use export_task::{ExportHandle, ExportTask};
pub use live_region::LiveRegion;
pub use newsletter::{
    NewsletterError, SubscribeToNewsletterCommand, SubscribeToNewsletterHandler,
    SubscribeToNewsletterResult,
};
pub use preferences_service::PreferencesService;
pub use registry::{AssessmentEntry, AssessmentRegistry, DEFAULT_MAX_LIVE_ASSESSMENTS};
pub use services::{AppServices, ServiceDeps};
pub use session_store::SessionStore;
pub use wizard::{AssessmentWizard, IntentOutcome, NavigationOutcome, WizardContext};
