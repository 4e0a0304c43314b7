//! AssessmentSession - the aggregate root for one run through the wizard.
//!
//! The session owns the step state machine and the user's selections,
//! ranking and reflections. Every mutation is validated here so the
//! invariants hold no matter which adapter drives the wizard:
//!
//! - prioritized ids are a duplicate-free subset of the selected ids
//! - every id exists in the catalog
//! - reflection keys are a subset of the prioritized ids at every checkpoint

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ValuesCatalog;
use crate::domain::foundation::{AssessmentId, StateMachine, Timestamp, ValidationError, ValueId};

use super::{AssessmentError, WizardSettings, WizardStep};

/// A completed move between two steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTransition {
    pub from: WizardStep,
    pub to: WizardStep,
}

/// Result of a selection intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Unchanged,
}

/// Result of a reordering intent. Boundary cases are reported, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The value now sits at `rank` (1-based) out of `total`.
    Moved { rank: usize, total: usize },
    AlreadyFirst,
    AlreadyLast,
    /// `move_to` targeted the rank the value already holds.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSession {
    id: AssessmentId,
    current_step: WizardStep,
    furthest_step: WizardStep,
    selected_value_ids: BTreeSet<ValueId>,
    prioritized_value_ids: Vec<ValueId>,
    reflections: BTreeMap<ValueId, String>,
    is_premium_user: bool,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl AssessmentSession {
    /// Creates an empty session positioned at the introduction.
    pub fn new(is_premium_user: bool) -> Self {
        let now = Timestamp::now();
        Self {
            id: AssessmentId::new(),
            current_step: WizardStep::first(),
            furthest_step: WizardStep::first(),
            selected_value_ids: BTreeSet::new(),
            prioritized_value_ids: Vec::new(),
            reflections: BTreeMap::new(),
            is_premium_user,
            started_at: now,
            updated_at: now,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Furthest step reached by forward navigation since the last restart.
    pub fn furthest_step(&self) -> WizardStep {
        self.furthest_step
    }

    pub fn selected_value_ids(&self) -> &BTreeSet<ValueId> {
        &self.selected_value_ids
    }

    /// Ranked ids, index 0 = most important.
    pub fn prioritized_value_ids(&self) -> &[ValueId] {
        &self.prioritized_value_ids
    }

    pub fn reflections(&self) -> &BTreeMap<ValueId, String> {
        &self.reflections
    }

    pub fn reflection(&self, id: &ValueId) -> Option<&str> {
        self.reflections.get(id).map(String::as_str)
    }

    pub fn is_premium_user(&self) -> bool {
        self.is_premium_user
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_selected(&self, id: &ValueId) -> bool {
        self.selected_value_ids.contains(id)
    }

    /// 1-based rank of a prioritized value.
    pub fn rank_of(&self, id: &ValueId) -> Option<usize> {
        self.prioritized_value_ids
            .iter()
            .position(|p| p == id)
            .map(|i| i + 1)
    }

    /// Premium status follows the signed-in user, not the assessment data.
    pub fn set_premium(&mut self, is_premium_user: bool) {
        self.is_premium_user = is_premium_user;
    }

    // ───────────────────────────────────────────────────────────────
    // Selection
    // ───────────────────────────────────────────────────────────────

    pub fn select(
        &mut self,
        catalog: &ValuesCatalog,
        id: &ValueId,
    ) -> Result<SelectionChange, AssessmentError> {
        self.require_step(WizardStep::Selection, "select")?;
        Self::require_known(catalog, id)?;

        if !self.selected_value_ids.insert(id.clone()) {
            return Ok(SelectionChange::Unchanged);
        }
        self.touch();
        Ok(SelectionChange::Added)
    }

    /// Removes a value and everything derived from it (rank, reflection).
    pub fn deselect(
        &mut self,
        catalog: &ValuesCatalog,
        id: &ValueId,
    ) -> Result<SelectionChange, AssessmentError> {
        self.require_step(WizardStep::Selection, "deselect")?;
        Self::require_known(catalog, id)?;

        if !self.selected_value_ids.remove(id) {
            return Ok(SelectionChange::Unchanged);
        }
        self.prioritized_value_ids.retain(|p| p != id);
        self.reflections.remove(id);
        self.touch();
        Ok(SelectionChange::Removed)
    }

    pub fn toggle(
        &mut self,
        catalog: &ValuesCatalog,
        id: &ValueId,
    ) -> Result<SelectionChange, AssessmentError> {
        if self.is_selected(id) {
            self.deselect(catalog, id)
        } else {
            self.select(catalog, id)
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Describes what blocks leaving the current step, if anything.
    pub fn precondition_deficiency(&self, settings: &WizardSettings) -> Option<String> {
        match self.current_step {
            WizardStep::Introduction | WizardStep::Reflection => None,
            WizardStep::Selection => {
                let count = self.selected_value_ids.len();
                let min = settings.required_selection();
                if count == 0 {
                    Some(if min == 1 {
                        "Select at least one value to continue.".to_string()
                    } else {
                        format!("Select at least {} values to continue.", min)
                    })
                } else if count < min {
                    Some(format!(
                        "Select at least {} values to continue ({} selected).",
                        min, count
                    ))
                } else {
                    None
                }
            }
            WizardStep::Prioritization => self
                .prioritized_value_ids
                .is_empty()
                .then(|| "Rank at least one value to continue.".to_string()),
            WizardStep::Results => Some("You have already reached your results.".to_string()),
        }
    }

    pub fn check_can_advance(&self, settings: &WizardSettings) -> Result<(), AssessmentError> {
        match self.precondition_deficiency(settings) {
            Some(deficiency) => Err(AssessmentError::precondition(self.current_step, deficiency)),
            None => Ok(()),
        }
    }

    /// Moves one step forward if the current step's requirement holds.
    pub fn advance(
        &mut self,
        catalog: &ValuesCatalog,
        settings: &WizardSettings,
    ) -> Result<StepTransition, AssessmentError> {
        self.check_can_advance(settings)?;

        let from = self.current_step;
        let target = from
            .next()
            .ok_or_else(|| AssessmentError::precondition(from, "There is no further step."))?;
        let to = from.transition_to(target)?;

        if from == WizardStep::Prioritization {
            self.prune_reflections();
        }
        self.current_step = to;
        if to == WizardStep::Prioritization {
            self.seed_prioritization(catalog);
        }
        if self.furthest_step.is_before(&to) {
            self.furthest_step = to;
        }
        self.touch();

        Ok(StepTransition { from, to })
    }

    /// Moves one step back. Nothing is discarded. `None` at the introduction.
    pub fn retreat(&mut self) -> Option<StepTransition> {
        let from = self.current_step;
        let to = from.previous()?;
        self.current_step = to;
        self.touch();
        Some(StepTransition { from, to })
    }

    /// Jumps to a step already reached by forward navigation.
    ///
    /// Forward jumps replay each intermediate `advance`, so a requirement
    /// broken since the step was first visited still blocks the jump. A
    /// failed jump leaves the session untouched.
    pub fn jump_to(
        &mut self,
        target: WizardStep,
        catalog: &ValuesCatalog,
        settings: &WizardSettings,
    ) -> Result<Option<StepTransition>, AssessmentError> {
        let from = self.current_step;
        if target == from {
            return Ok(None);
        }
        if self.furthest_step == WizardStep::first() || self.furthest_step.is_before(&target) {
            return Err(AssessmentError::StepNotVisited {
                requested: target,
                furthest: self.furthest_step,
            });
        }

        if target.is_before(&from) {
            self.current_step = from.transition_to(target)?;
            self.touch();
            return Ok(Some(StepTransition { from, to: target }));
        }

        let mut draft = self.clone();
        while draft.current_step != target {
            draft.advance(catalog, settings)?;
        }
        *self = draft;
        Ok(Some(StepTransition { from, to: target }))
    }

    /// Clears all assessment data and returns to the introduction.
    ///
    /// The session id and premium flag survive: they belong to the visitor.
    pub fn restart(&mut self) -> StepTransition {
        let from = self.current_step;
        let now = Timestamp::now();
        self.current_step = WizardStep::first();
        self.furthest_step = WizardStep::first();
        self.selected_value_ids.clear();
        self.prioritized_value_ids.clear();
        self.reflections.clear();
        self.started_at = now;
        self.updated_at = now;
        StepTransition {
            from,
            to: WizardStep::first(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Prioritization
    // ───────────────────────────────────────────────────────────────

    /// Brings the ranking in line with the selection.
    ///
    /// Existing ranks are kept, deselected ids are dropped and newly
    /// selected ids are appended in catalog order.
    pub fn seed_prioritization(&mut self, catalog: &ValuesCatalog) {
        let selected = &self.selected_value_ids;
        self.prioritized_value_ids.retain(|id| selected.contains(id));

        let mut missing: Vec<&ValueId> = selected
            .iter()
            .filter(|id| !self.prioritized_value_ids.contains(id))
            .collect();
        missing.sort_by_key(|id| catalog.position(id).unwrap_or(usize::MAX));

        let missing: Vec<ValueId> = missing.into_iter().cloned().collect();
        self.prioritized_value_ids.extend(missing);
    }

    pub fn move_up(&mut self, id: &ValueId) -> Result<MoveOutcome, AssessmentError> {
        self.require_step(WizardStep::Prioritization, "move up")?;
        let index = self.prioritized_index(id)?;
        if index == 0 {
            return Ok(MoveOutcome::AlreadyFirst);
        }
        self.prioritized_value_ids.swap(index, index - 1);
        self.touch();
        Ok(MoveOutcome::Moved {
            rank: index,
            total: self.prioritized_value_ids.len(),
        })
    }

    pub fn move_down(&mut self, id: &ValueId) -> Result<MoveOutcome, AssessmentError> {
        self.require_step(WizardStep::Prioritization, "move down")?;
        let index = self.prioritized_index(id)?;
        if index + 1 >= self.prioritized_value_ids.len() {
            return Ok(MoveOutcome::AlreadyLast);
        }
        self.prioritized_value_ids.swap(index, index + 1);
        self.touch();
        Ok(MoveOutcome::Moved {
            rank: index + 2,
            total: self.prioritized_value_ids.len(),
        })
    }

    /// Places a value at a 1-based rank, shifting the others.
    pub fn move_to(&mut self, id: &ValueId, rank: usize) -> Result<MoveOutcome, AssessmentError> {
        self.require_step(WizardStep::Prioritization, "move")?;
        let index = self.prioritized_index(id)?;
        let total = self.prioritized_value_ids.len();
        if rank == 0 || rank > total {
            return Err(ValidationError::out_of_range("rank", 1, total as i64, rank as i64).into());
        }
        if rank - 1 == index {
            return Ok(MoveOutcome::Unchanged);
        }
        let value = self.prioritized_value_ids.remove(index);
        self.prioritized_value_ids.insert(rank - 1, value);
        self.touch();
        Ok(MoveOutcome::Moved { rank, total })
    }

    // ───────────────────────────────────────────────────────────────
    // Reflection
    // ───────────────────────────────────────────────────────────────

    /// Stores trimmed reflection text, truncated to `max_chars`.
    ///
    /// Blank text clears the reflection; the mapping stays sparse.
    pub fn save_reflection(
        &mut self,
        id: &ValueId,
        text: &str,
        max_chars: usize,
    ) -> Result<(), AssessmentError> {
        self.require_step(WizardStep::Reflection, "save reflection")?;
        self.prioritized_index(id)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.reflections.remove(id);
        } else {
            let stored: String = trimmed.chars().take(max_chars).collect();
            self.reflections.insert(id.clone(), stored);
        }
        self.touch();
        Ok(())
    }

    /// Drops reflections whose value is no longer ranked. Returns how many.
    pub fn prune_reflections(&mut self) -> usize {
        let before = self.reflections.len();
        let ranked = &self.prioritized_value_ids;
        self.reflections.retain(|id, _| ranked.contains(id));
        before - self.reflections.len()
    }

    /// Re-establishes the invariants against a (possibly changed) catalog.
    ///
    /// Used after loading a persisted session. Returns the number of ids
    /// dropped because the catalog no longer knows them. A session left
    /// past the selection step without enough values goes back to it.
    pub fn reconcile(&mut self, catalog: &ValuesCatalog, settings: &WizardSettings) -> usize {
        let before = self.selected_value_ids.len();
        self.selected_value_ids.retain(|id| catalog.contains(id));
        let dropped = before - self.selected_value_ids.len();

        let selected = &self.selected_value_ids;
        let mut seen = BTreeSet::new();
        self.prioritized_value_ids
            .retain(|id| selected.contains(id) && seen.insert(id.clone()));

        if WizardStep::Selection.is_before(&self.current_step) {
            if self.selected_value_ids.len() < settings.required_selection() {
                self.current_step = WizardStep::Selection;
                self.furthest_step = WizardStep::Selection;
            } else {
                self.seed_prioritization(catalog);
            }
        }

        self.prune_reflections();
        if self.furthest_step.is_before(&self.current_step) {
            self.furthest_step = self.current_step;
        }
        dropped
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    fn require_step(&self, step: WizardStep, intent: &str) -> Result<(), AssessmentError> {
        if self.current_step != step {
            return Err(AssessmentError::invalid_intent(self.current_step, intent));
        }
        Ok(())
    }

    fn require_known(catalog: &ValuesCatalog, id: &ValueId) -> Result<(), AssessmentError> {
        if !catalog.contains(id) {
            return Err(AssessmentError::UnknownValue(id.clone()));
        }
        Ok(())
    }

    fn prioritized_index(&self, id: &ValueId) -> Result<usize, AssessmentError> {
        self.prioritized_value_ids
            .iter()
            .position(|p| p == id)
            .ok_or_else(|| AssessmentError::NotPrioritized(id.clone()))
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
