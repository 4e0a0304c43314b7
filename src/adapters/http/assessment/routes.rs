//! HTTP routes for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    apply_intent, cancel_export, create_assessment, export_results, export_status, get_assessment,
    get_results, AssessmentHandlers,
};

/// Creates the assessment router. Mount under `/api/assessments`.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/", post(create_assessment))
        .route("/:id", get(get_assessment))
        .route("/:id/intents", post(apply_intent))
        .route("/:id/results", get(get_results))
        .route(
            "/:id/export",
            get(export_status)
                .post(export_results)
                .delete(cancel_export),
        )
        .with_state(handlers)
}
