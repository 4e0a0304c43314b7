//! Logs wizard step changes.

use async_trait::async_trait;

use crate::domain::assessment::StepChanged;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventHandler;

/// Event type published on every wizard transition.
pub const STEP_CHANGED: &str = "assessment.step_changed.v1";

/// Writes one `tracing` record per step change.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepChangeLogger;

#[async_trait]
impl EventHandler for StepChangeLogger {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let change: StepChanged = event.payload_as().map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("bad step change payload: {}", e))
        })?;

        tracing::info!(
            assessment_id = %change.assessment_id,
            step = change.step.as_str(),
            previous = change.previous.as_str(),
            "Assessment step changed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "StepChangeLogger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{StepTransition, WizardStep};
    use crate::domain::foundation::{AssessmentId, SerializableDomainEvent};
    use serde_json::json;

    #[tokio::test]
    async fn accepts_step_changed_payload() {
        let event = StepChanged::from_transition(
            AssessmentId::new(),
            StepTransition {
                from: WizardStep::Introduction,
                to: WizardStep::Selection,
            },
        );
        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.event_type, STEP_CHANGED);

        assert!(StepChangeLogger.handle(envelope).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_foreign_payload() {
        let envelope = EventEnvelope::new(STEP_CHANGED, "x", "Assessment", json!({"step": 3}));
        assert!(StepChangeLogger.handle(envelope).await.is_err());
    }
}
