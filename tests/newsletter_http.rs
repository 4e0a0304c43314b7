//! HTTP tests for `POST /api/newsletter/subscribe`.
//!
//! The full API router is driven in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use values_compass::adapters::http::api_router;
use values_compass::adapters::{
    InMemoryEventBus, InMemoryKeyValueStore, InMemorySubscriptionSink, LocalFlagAuth,
    PulldownExportService, RecordingAnnouncer, TextStepRenderer,
};
use values_compass::application::{AppServices, ServiceDeps, DEFAULT_MAX_LIVE_ASSESSMENTS};
use values_compass::domain::assessment::WizardSettings;
use values_compass::domain::catalog::ValuesCatalog;
use values_compass::domain::newsletter::EmailAddress;
use values_compass::ports::{KeyValueStore, SinkError, SubscriptionOutcome, SubscriptionSink};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Sink whose backing service is down.
struct UnavailableSink;

#[async_trait]
impl SubscriptionSink for UnavailableSink {
    async fn subscribe(&self, _email: &EmailAddress) -> Result<SubscriptionOutcome, SinkError> {
        Err(SinkError("connection refused".to_string()))
    }
}

fn app_with_sink(sink: Arc<dyn SubscriptionSink>) -> Router {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
    let auth = Arc::new(LocalFlagAuth::new(store.clone(), Duration::from_millis(100)));
    auth.readiness().mark_ready();

    let services = AppServices::new(ServiceDeps {
        catalog: Arc::new(ValuesCatalog::builtin().unwrap()),
        settings: WizardSettings::default(),
        premium_visualizations: true,
        max_live_assessments: DEFAULT_MAX_LIVE_ASSESSMENTS,
        store,
        publisher: Arc::new(InMemoryEventBus::new()),
        announcer: Arc::new(RecordingAnnouncer::new()),
        renderer: Arc::new(TextStepRenderer),
        exporter: Arc::new(PulldownExportService::new()),
        auth,
        sink,
    });
    api_router(&services)
}

fn app() -> Router {
    app_with_sink(Arc::new(InMemorySubscriptionSink::new()))
}

fn subscribe_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/newsletter/subscribe")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn valid_email_subscribes() {
    let (status, json) = send(app(), subscribe_request(r#"{"email":"ada@example.com"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Thanks for subscribing!");
}

#[tokio::test]
async fn repeat_subscription_still_succeeds() {
    let app = app();
    send(app.clone(), subscribe_request(r#"{"email":"ada@example.com"}"#)).await;

    let (status, json) = send(app, subscribe_request(r#"{"email":"  ADA@example.com "}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "You're already subscribed.");
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn missing_email_is_rejected() {
    let (status, json) = send(app(), subscribe_request("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Email is required.");
}

#[tokio::test]
async fn blank_email_is_rejected() {
    let (status, json) = send(app(), subscribe_request(r#"{"email":"   "}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Email is required.");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let (status, json) = send(app(), subscribe_request(r#"{"email":"not-an-email"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter a valid email address.");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, json) = send(app(), subscribe_request("{ nope")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid request body.");
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/newsletter/subscribe")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "POST");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn sink_failure_is_a_server_error() {
    let (status, json) = send(
        app_with_sink(Arc::new(UnavailableSink)),
        subscribe_request(r#"{"email":"ada@example.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Subscription failed. Please try again later.");
}
