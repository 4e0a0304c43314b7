//! DTOs for assessment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{AssessmentWizard, IntentOutcome, LiveRegion, NavigationOutcome};
use crate::domain::announcement::Announcement;
use crate::domain::assessment::{MoveOutcome, SelectionChange, StepView};
use crate::ports::Screen;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query for `POST /api/assessments/:id/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// `markdown` (default), `html` or `pdf`
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The current step as data plus its rendered screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentStateResponse {
    pub assessment_id: String,
    pub view: StepView,
    pub screen: Screen,
    /// Recent live-region messages, oldest first.
    pub announcements: Vec<Announcement>,
}

impl AssessmentStateResponse {
    pub fn new(wizard: &AssessmentWizard, live_region: &LiveRegion) -> Self {
        Self {
            assessment_id: wizard.id().to_string(),
            view: wizard.view(),
            screen: wizard.screen(),
            announcements: live_region.recent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResponse {
    /// What the intent did, e.g. `moved`, `added`, `already_first`.
    pub outcome: String,
    #[serde(flatten)]
    pub state: AssessmentStateResponse,
}

impl IntentResponse {
    pub fn new(
        outcome: IntentOutcome,
        wizard: &AssessmentWizard,
        live_region: &LiveRegion,
    ) -> Self {
        Self {
            outcome: outcome_label(outcome).to_string(),
            state: AssessmentStateResponse::new(wizard, live_region),
        }
    }
}

fn outcome_label(outcome: IntentOutcome) -> &'static str {
    match outcome {
        IntentOutcome::Navigation(NavigationOutcome::Moved(_)) => "moved",
        IntentOutcome::Navigation(NavigationOutcome::Unchanged) => "unchanged",
        IntentOutcome::Selection(SelectionChange::Added) => "added",
        IntentOutcome::Selection(SelectionChange::Removed) => "removed",
        IntentOutcome::Selection(SelectionChange::Unchanged) => "unchanged",
        IntentOutcome::Move(MoveOutcome::Moved { .. }) => "moved",
        IntentOutcome::Move(MoveOutcome::AlreadyFirst) => "already_first",
        IntentOutcome::Move(MoveOutcome::AlreadyLast) => "already_last",
        IntentOutcome::Move(MoveOutcome::Unchanged) => "unchanged",
        IntentOutcome::ReflectionSaved => "saved",
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }
}
