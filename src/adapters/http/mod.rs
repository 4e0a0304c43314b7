//! HTTP adapters - REST API implementations.
//!
//! Each module has its own HTTP adapter for endpoint exposure; `api_router`
//! mounts them all.

pub mod assessment;
pub mod newsletter;
pub mod preferences;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::application::AppServices;

// Re-export key types for convenience
pub use assessment::{assessment_routes, AssessmentHandlers};
pub use newsletter::{newsletter_routes, NewsletterHandlers};
pub use preferences::{preferences_routes, PreferencesHandlers};

/// Builds the full API router from the composed services.
pub fn api_router(services: &AppServices) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/assessments",
            assessment_routes(AssessmentHandlers::new(services.assessments.clone())),
        )
        .nest(
            "/api/newsletter",
            newsletter_routes(NewsletterHandlers::new(services.newsletter.clone())),
        )
        .nest(
            "/api/preferences",
            preferences_routes(PreferencesHandlers::new(services.preferences.clone())),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
