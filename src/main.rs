//! Values Compass server.
//!
//! Loads configuration, composes the services and serves the HTTP API.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use values_compass::adapters::http::api_router;
use values_compass::adapters::{
    FileKeyValueStore, InMemoryEventBus, InMemoryKeyValueStore, InMemorySubscriptionSink,
    LocalFlagAuth, PulldownExportService, StepChangeLogger, TextStepRenderer, TracingAnnouncer,
    STEP_CHANGED,
};
use values_compass::application::{AppServices, ServiceDeps};
use values_compass::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use values_compass::domain::catalog::{CatalogError, ValuesCatalog};
use values_compass::ports::{DocumentExportService, EventSubscriber, KeyValueStore};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Could not load values catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let catalog = match &config.assessment.catalog_path {
        Some(path) => ValuesCatalog::load_file(path).await?,
        None => ValuesCatalog::builtin()?,
    };
    tracing::info!(values = catalog.len(), "Values catalog loaded");

    let services = compose(&config, catalog).await;
    let app = with_middleware(api_router(&services), &config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Values Compass listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn compose(config: &AppConfig, catalog: ValuesCatalog) -> AppServices {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.path)),
    };
    tracing::info!(backend = ?config.storage.backend, "Persistence bridge ready");

    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe(STEP_CHANGED, Arc::new(StepChangeLogger));

    let mut exporter = PulldownExportService::new().with_pdf_timeout(config.export.timeout_secs);
    if let Some(path) = &config.export.pandoc_path {
        exporter = exporter.with_pandoc_path(path.clone());
    }
    if !exporter.is_available().await {
        tracing::warn!("Pandoc not found; PDF export will fail until it is installed");
    }

    let auth = Arc::new(LocalFlagAuth::new(store.clone(), config.auth.ready_timeout()));
    auth.initialize().await;

    AppServices::new(ServiceDeps {
        catalog: Arc::new(catalog),
        settings: config.assessment.wizard_settings(),
        premium_visualizations: config.features.premium_visualizations,
        max_live_assessments: config.assessment.max_live,
        store,
        publisher: bus,
        announcer: Arc::new(TracingAnnouncer),
        renderer: Arc::new(TextStepRenderer),
        exporter: Arc::new(exporter),
        auth,
        sink: Arc::new(InMemorySubscriptionSink::new()),
    })
}

fn with_middleware(router: Router, config: &AppConfig) -> Router {
    let mut router = router
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(config));

    if config.features.enable_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    } else if config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
