//! State machine trait for step and status enums.
//!
//! The wizard step sequence and the export dialog status both implement this
//! trait so that every transition goes through one validated entry point.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their legal transitions; `transition_to` rejects
/// everything else.
///
/// ```ignore
/// let next = WizardStep::Selection.transition_to(WizardStep::Prioritization)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Gate {
        Closed,
        Open,
        Sealed,
    }

    impl StateMachine for Gate {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Gate::Closed => vec![Gate::Open, Gate::Sealed],
                Gate::Open => vec![Gate::Closed],
                Gate::Sealed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_accepts_listed_target() {
        assert_eq!(Gate::Closed.transition_to(Gate::Open), Ok(Gate::Open));
    }

    #[test]
    fn transition_to_rejects_unlisted_target() {
        let err = Gate::Open.transition_to(Gate::Sealed).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Sealed"));
    }

    #[test]
    fn state_without_transitions_is_terminal() {
        assert!(Gate::Sealed.is_terminal());
        assert!(!Gate::Closed.is_terminal());
    }
}
