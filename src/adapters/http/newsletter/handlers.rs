//! HTTP handlers for the newsletter endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    NewsletterError, SubscribeToNewsletterCommand, SubscribeToNewsletterHandler,
};

use super::dto::{SubscribeFailure, SubscribeRequest, SubscribeSuccess};

#[derive(Clone)]
pub struct NewsletterHandlers {
    subscribe_handler: Arc<SubscribeToNewsletterHandler>,
}

impl NewsletterHandlers {
    pub fn new(subscribe_handler: Arc<SubscribeToNewsletterHandler>) -> Self {
        Self { subscribe_handler }
    }
}

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(handlers): State<NewsletterHandlers>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed newsletter request");
            return failure(StatusCode::BAD_REQUEST, "Invalid request body.");
        }
    };

    let email = match req.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return failure(StatusCode::BAD_REQUEST, "Email is required."),
    };

    match handlers
        .subscribe_handler
        .handle(SubscribeToNewsletterCommand { email })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(SubscribeSuccess::new(result.message()))).into_response(),
        Err(NewsletterError::InvalidEmail(_)) => {
            failure(StatusCode::BAD_REQUEST, "Please enter a valid email address.")
        }
        Err(NewsletterError::Sink(e)) => {
            tracing::error!(error = %e, "Newsletter subscription failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Subscription failed. Please try again later.",
            )
        }
    }
}

/// Any other method on the subscribe route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(SubscribeFailure::new("Method not allowed.")),
    )
        .into_response()
}

fn failure(status: StatusCode, error: &str) -> Response {
    (status, Json(SubscribeFailure::new(error))).into_response()
}
