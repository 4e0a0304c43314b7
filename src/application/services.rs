//! AppServices - the single composition point.
//!
//! `main.rs` picks the adapters; everything else receives its
//! collaborators from here by `Arc`.

use std::sync::Arc;

use crate::domain::assessment::WizardSettings;
use crate::domain::catalog::ValuesCatalog;
use crate::ports::{
    Announcer, AuthCapability, DocumentExportService, EventPublisher, KeyValueStore, StepRenderer,
    SubscriptionSink,
};

use super::{
    AssessmentRegistry, PreferencesService, SubscribeToNewsletterHandler, WizardContext,
};

/// Adapters chosen by the binary (or a test).
pub struct ServiceDeps {
    pub catalog: Arc<ValuesCatalog>,
    pub settings: WizardSettings,
    pub premium_visualizations: bool,
    /// Cap on wizards held in memory by the registry.
    pub max_live_assessments: usize,
    pub store: Arc<dyn KeyValueStore>,
    pub publisher: Arc<dyn EventPublisher>,
    pub announcer: Arc<dyn Announcer>,
    pub renderer: Arc<dyn StepRenderer>,
    pub exporter: Arc<dyn DocumentExportService>,
    pub auth: Arc<dyn AuthCapability>,
    pub sink: Arc<dyn SubscriptionSink>,
}

#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<ValuesCatalog>,
    pub auth: Arc<dyn AuthCapability>,
    pub exporter: Arc<dyn DocumentExportService>,
    pub assessments: Arc<AssessmentRegistry>,
    pub preferences: Arc<PreferencesService>,
    pub newsletter: Arc<SubscribeToNewsletterHandler>,
}

impl AppServices {
    pub fn new(deps: ServiceDeps) -> Self {
        let ctx = WizardContext {
            catalog: deps.catalog.clone(),
            settings: deps.settings,
            premium_visualizations: deps.premium_visualizations,
            publisher: deps.publisher,
            announcer: deps.announcer.clone(),
            renderer: deps.renderer,
        };

        let assessments = Arc::new(AssessmentRegistry::new(
            ctx,
            deps.store.clone(),
            deps.auth.clone(),
            deps.exporter.clone(),
        )
        .with_max_live(deps.max_live_assessments));
        let preferences = Arc::new(PreferencesService::new(
            deps.store.clone(),
            deps.announcer,
        ));
        let newsletter = Arc::new(SubscribeToNewsletterHandler::new(deps.sink, deps.store));

        Self {
            catalog: deps.catalog,
            auth: deps.auth,
            exporter: deps.exporter,
            assessments,
            preferences,
            newsletter,
        }
    }
}
