//! HTTP routes for the newsletter endpoint.

use axum::{routing::post, Router};

use super::handlers::{method_not_allowed, subscribe, NewsletterHandlers};

/// Creates the newsletter router. Mount under `/api/newsletter`.
pub fn newsletter_routes(handlers: NewsletterHandlers) -> Router {
    Router::new()
        .route("/subscribe", post(subscribe).fallback(method_not_allowed))
        .with_state(handlers)
}
