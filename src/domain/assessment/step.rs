//! WizardStep enum representing the five assessment screens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The wizard steps in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Introduction,
    Selection,
    Prioritization,
    Reflection,
    Results,
}

impl WizardStep {
    /// Returns all steps in canonical order.
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Introduction,
            WizardStep::Selection,
            WizardStep::Prioritization,
            WizardStep::Reflection,
            WizardStep::Results,
        ]
    }

    /// Returns the first step.
    pub fn first() -> WizardStep {
        WizardStep::Introduction
    }

    /// Returns the 0-based index of this step in the canonical order.
    pub fn order_index(&self) -> usize {
        match self {
            WizardStep::Introduction => 0,
            WizardStep::Selection => 1,
            WizardStep::Prioritization => 2,
            WizardStep::Reflection => 3,
            WizardStep::Results => 4,
        }
    }

    /// Returns the next step in order, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::all().get(self.order_index() + 1).copied()
    }

    /// Returns the previous step in order, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        self.order_index()
            .checked_sub(1)
            .and_then(|idx| Self::all().get(idx).copied())
    }

    /// True for the last step of the sequence.
    pub fn is_final(&self) -> bool {
        self.next().is_none()
    }

    /// Returns true if this step comes before another in order.
    pub fn is_before(&self, other: &WizardStep) -> bool {
        self.order_index() < other.order_index()
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::Introduction => "Introduction",
            WizardStep::Selection => "Choose your values",
            WizardStep::Prioritization => "Prioritize your values",
            WizardStep::Reflection => "Reflect",
            WizardStep::Results => "Your results",
        }
    }

    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Introduction => "introduction",
            WizardStep::Selection => "selection",
            WizardStep::Prioritization => "prioritization",
            WizardStep::Reflection => "reflection",
            WizardStep::Results => "results",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Adjacent forward moves and any backward move (previous, restart, jump back).
///
/// Forward jumps are composed of single forward moves so that every
/// intermediate precondition is checked.
impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target) || target.is_before(self)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_steps_in_order() {
        let indices: Vec<_> = WizardStep::all().iter().map(|s| s.order_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn next_and_previous_walk_the_sequence() {
        assert_eq!(WizardStep::Introduction.next(), Some(WizardStep::Selection));
        assert_eq!(WizardStep::Reflection.next(), Some(WizardStep::Results));
        assert_eq!(WizardStep::Results.next(), None);
        assert_eq!(WizardStep::Selection.previous(), Some(WizardStep::Introduction));
        assert_eq!(WizardStep::Introduction.previous(), None);
    }

    #[test]
    fn results_is_final() {
        assert!(WizardStep::Results.is_final());
        assert!(!WizardStep::Reflection.is_final());
    }

    #[test]
    fn forward_transition_is_single_step_only() {
        assert!(WizardStep::Selection.can_transition_to(&WizardStep::Prioritization));
        assert!(!WizardStep::Selection.can_transition_to(&WizardStep::Reflection));
        assert!(WizardStep::Introduction
            .transition_to(WizardStep::Results)
            .is_err());
    }

    #[test]
    fn any_backward_transition_is_valid() {
        assert_eq!(
            WizardStep::Results.valid_transitions(),
            vec![
                WizardStep::Introduction,
                WizardStep::Selection,
                WizardStep::Prioritization,
                WizardStep::Reflection,
            ]
        );
    }

    #[test]
    fn serializes_to_snake_case_matching_as_str() {
        for step in WizardStep::all() {
            let json = serde_json::to_string(step).unwrap();
            assert_eq!(json, format!("\"{}\"", step.as_str()));
        }
    }
}
