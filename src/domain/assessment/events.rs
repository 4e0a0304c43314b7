//! Assessment domain events.
//!
//! - `StepChanged` - the wizard moved between steps

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, AssessmentId, EventId, Timestamp};

use super::{StepTransition, WizardStep};

/// Published after every successful step transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepChanged {
    pub event_id: EventId,
    pub assessment_id: AssessmentId,
    /// Step the wizard is now on.
    pub step: WizardStep,
    pub previous: WizardStep,
    pub occurred_at: Timestamp,
}

impl StepChanged {
    pub fn from_transition(assessment_id: AssessmentId, transition: StepTransition) -> Self {
        Self {
            event_id: EventId::new(),
            assessment_id,
            step: transition.to,
            previous: transition.from,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    StepChanged,
    event_type = "assessment.step_changed.v1",
    aggregate_id = assessment_id,
    aggregate_type = "Assessment",
    occurred_at = occurred_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn envelope_carries_step_and_previous() {
        let id = AssessmentId::new();
        let event = StepChanged::from_transition(
            id,
            StepTransition {
                from: WizardStep::Selection,
                to: WizardStep::Prioritization,
            },
        );

        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.event_type, "assessment.step_changed.v1");
        assert_eq!(envelope.aggregate_type, "Assessment");
        assert_eq!(envelope.aggregate_id, id.to_string());
        assert_eq!(envelope.payload["step"], "prioritization");
        assert_eq!(envelope.payload["previous"], "selection");
        assert_eq!(event.event_type(), "assessment.step_changed.v1");
    }
}
