//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{AssessmentEntry, AssessmentRegistry};
use crate::domain::assessment::{AssessmentError, UserIntent};
use crate::domain::foundation::{AssessmentId, ErrorCode};
use crate::ports::{ExportError, ExportFormat};

use super::dto::{AssessmentStateResponse, ErrorResponse, ExportQuery, IntentResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    registry: Arc<AssessmentRegistry>,
}

impl AssessmentHandlers {
    pub fn new(registry: Arc<AssessmentRegistry>) -> Self {
        Self { registry }
    }

    async fn lookup(&self, raw_id: &str) -> Result<Arc<AssessmentEntry>, Response> {
        let id = raw_id.parse::<AssessmentId>().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid assessment ID")),
            )
                .into_response()
        })?;

        self.registry.get(&id).await.ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(
                    ErrorResponse::not_found("Assessment", raw_id)
                        .with_details(json!({ "code": ErrorCode::AssessmentNotFound.to_string() })),
                ),
            )
                .into_response()
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments - Start a new assessment
pub async fn create_assessment(State(handlers): State<AssessmentHandlers>) -> Response {
    let (_, entry) = handlers.registry.create().await;
    let wizard = entry.wizard.lock().await;
    let response = AssessmentStateResponse::new(&wizard, &entry.live_region);
    (StatusCode::CREATED, Json(response)).into_response()
}

/// GET /api/assessments/:id - Current step and screen
pub async fn get_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
) -> Response {
    let entry = match handlers.lookup(&id).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };
    let wizard = entry.wizard.lock().await;
    let response = AssessmentStateResponse::new(&wizard, &entry.live_region);
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/assessments/:id/intents - Apply a user intent
pub async fn apply_intent(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
    body: Result<Json<UserIntent>, JsonRejection>,
) -> Response {
    let intent = match body {
        Ok(Json(intent)) => intent,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!("Invalid intent: {}", rejection))),
            )
                .into_response()
        }
    };

    let entry = match handlers.lookup(&id).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    let mut wizard = entry.wizard.lock().await;
    match wizard.apply(intent).await {
        Ok(outcome) => {
            let response = IntentResponse::new(outcome, &wizard, &entry.live_region);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments/:id/results - Assembled results
pub async fn get_results(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
) -> Response {
    let entry = match handlers.lookup(&id).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };
    let results = entry.wizard.lock().await.results();
    (StatusCode::OK, Json(results)).into_response()
}

/// GET /api/assessments/:id/export - Export dialog state
pub async fn export_status(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
) -> Response {
    match handlers.lookup(&id).await {
        Ok(entry) => (StatusCode::OK, Json(entry.export.dialog())).into_response(),
        Err(response) => response,
    }
}

/// POST /api/assessments/:id/export?format=pdf - Export results as a download
pub async fn export_results(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let format = match query.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::default(),
        Some(Ok(format)) => format,
        Some(Err(e)) => return handle_assessment_error(e.into()),
    };

    let entry = match handlers.lookup(&id).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };
    handlers.registry.refresh_premium(&entry).await;

    let started = {
        let wizard = entry.wizard.lock().await;
        entry.export.start(wizard.session(), wizard.catalog(), format)
    };
    let handle = match started {
        Ok(handle) => handle,
        Err(e) => return handle_assessment_error(e.into()),
    };

    match handle.wait().await {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type.clone()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.filename),
                ),
            ],
            document.content,
        )
            .into_response(),
        Err(e) => handle_assessment_error(e.into()),
    }
}

/// DELETE /api/assessments/:id/export - Cancel the running export
pub async fn cancel_export(
    State(handlers): State<AssessmentHandlers>,
    Path(id): Path<String>,
) -> Response {
    let entry = match handlers.lookup(&id).await {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    let mut progress = entry.export.subscribe();
    if let Err(e) = entry.export.cancel() {
        return handle_assessment_error(e.into());
    }

    // Reply once the export has actually stopped.
    let dialog = match progress
        .wait_for(|dialog| !dialog.status.is_in_progress())
        .await
    {
        Ok(dialog) => dialog.clone(),
        Err(_) => entry.export.dialog(),
    };
    (StatusCode::OK, Json(dialog)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_assessment_error(error: AssessmentError) -> Response {
    let status = match &error {
        AssessmentError::PreconditionNotMet { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentError::UnknownValue(_)
        | AssessmentError::NotPrioritized(_)
        | AssessmentError::StepNotVisited { .. }
        | AssessmentError::InvalidIntent { .. }
        | AssessmentError::Validation(_) => StatusCode::BAD_REQUEST,
        AssessmentError::RenderFailure(_) | AssessmentError::PersistenceUnavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AssessmentError::ExportFailure(export) => export_status_code(export),
    };

    let mut body = ErrorResponse::new(error.code(), error.user_message());
    match &error {
        AssessmentError::PreconditionNotMet { step, deficiency } => {
            body = body.with_details(json!({ "step": step, "deficiency": deficiency }));
        }
        AssessmentError::StepNotVisited {
            requested,
            furthest,
        } => {
            body = body.with_details(json!({ "requested": requested, "furthest": furthest }));
        }
        _ => {}
    }

    if status.is_server_error() {
        tracing::warn!(error = %error, "Assessment request failed");
    }
    (status, Json(body)).into_response()
}

fn export_status_code(error: &ExportError) -> StatusCode {
    match error {
        ExportError::PremiumRequired => StatusCode::FORBIDDEN,
        ExportError::AlreadyInProgress | ExportError::Cancelled | ExportError::NotRunning => {
            StatusCode::CONFLICT
        }
        ExportError::NothingToExport => StatusCode::UNPROCESSABLE_ENTITY,
        ExportError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
        ExportError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ExportError::Conversion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ExportError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}
