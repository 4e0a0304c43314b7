//! Assessment-specific error types.

use thiserror::Error;

use crate::domain::export::ExportError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError, ValueId};

use super::WizardStep;

/// Errors raised by wizard intents and the capabilities it drives.
///
/// Every variant is recoverable: the worst case is restarting from the
/// introduction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The current step's requirement is not satisfied; nothing changed.
    #[error("Cannot leave {step}: {deficiency}")]
    PreconditionNotMet {
        step: WizardStep,
        deficiency: String,
    },

    #[error("Unknown value: {0}")]
    UnknownValue(ValueId),

    #[error("Value is not in the prioritized list: {0}")]
    NotPrioritized(ValueId),

    #[error("Cannot jump to {requested}: furthest visited step is {furthest}")]
    StepNotVisited {
        requested: WizardStep,
        furthest: WizardStep,
    },

    #[error("'{intent}' is not available on the {step} step")]
    InvalidIntent { step: WizardStep, intent: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to render screen: {0}")]
    RenderFailure(String),

    #[error("Saved progress is unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Export failed: {0}")]
    ExportFailure(#[from] ExportError),
}

impl AssessmentError {
    pub fn precondition(step: WizardStep, deficiency: impl Into<String>) -> Self {
        AssessmentError::PreconditionNotMet {
            step,
            deficiency: deficiency.into(),
        }
    }

    pub fn invalid_intent(step: WizardStep, intent: impl Into<String>) -> Self {
        AssessmentError::InvalidIntent {
            step,
            intent: intent.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::PreconditionNotMet { .. } => ErrorCode::PreconditionNotMet,
            AssessmentError::UnknownValue(_) => ErrorCode::ValueNotFound,
            AssessmentError::NotPrioritized(_) => ErrorCode::NotPrioritized,
            AssessmentError::StepNotVisited { .. } => ErrorCode::StepNotVisited,
            AssessmentError::InvalidIntent { .. } => ErrorCode::InvalidIntent,
            AssessmentError::Validation(_) => ErrorCode::ValidationFailed,
            AssessmentError::RenderFailure(_) => ErrorCode::RenderFailure,
            AssessmentError::PersistenceUnavailable(_) => ErrorCode::PersistenceUnavailable,
            AssessmentError::ExportFailure(ExportError::PremiumRequired) => {
                ErrorCode::PremiumRequired
            }
            AssessmentError::ExportFailure(_) => ErrorCode::ExportFailure,
        }
    }

    /// Message suitable for the assistive-technology live region.
    pub fn user_message(&self) -> String {
        match self {
            AssessmentError::PreconditionNotMet { deficiency, .. } => deficiency.clone(),
            AssessmentError::UnknownValue(_) => "That value is not in the list.".to_string(),
            AssessmentError::NotPrioritized(_) => {
                "That value is not one of your ranked values.".to_string()
            }
            AssessmentError::StepNotVisited { requested, .. } => {
                format!("Complete the earlier steps before opening {}.", requested)
            }
            AssessmentError::InvalidIntent { step, .. } => {
                format!("That action is not available on the {} step.", step)
            }
            AssessmentError::Validation(err) => err.to_string(),
            AssessmentError::RenderFailure(_) => {
                "Something went wrong displaying this step.".to_string()
            }
            AssessmentError::PersistenceUnavailable(_) => {
                "Your progress could not be saved on this device. You can keep going.".to_string()
            }
            AssessmentError::ExportFailure(err) => err.user_message(),
        }
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
