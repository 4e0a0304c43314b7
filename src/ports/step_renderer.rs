//! Step Renderer Port - turns a step view into a screen.
//!
//! Rendering is a pure projection: the renderer receives a read-only
//! `StepView` and never touches the session. Each call replaces the
//! previous screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assessment::{StepView, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to render {step}: {reason}")]
pub struct RenderError {
    pub step: WizardStep,
    pub reason: String,
}

impl RenderError {
    pub fn new(step: WizardStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

/// A rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    /// `None` for the inline error screen.
    pub step: Option<WizardStep>,
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

impl Screen {
    /// Inline error block shown when a step cannot be rendered.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            step: None,
            title: "Something went wrong".to_string(),
            body: message.into(),
            is_error: true,
        }
    }
}

/// Port for rendering wizard steps.
pub trait StepRenderer: Send + Sync {
    fn render(&self, view: &StepView) -> Result<Screen, RenderError>;
}
