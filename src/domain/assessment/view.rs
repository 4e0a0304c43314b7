//! StepView - read-only projection of a session for the step renderer.
//!
//! Views are recomputed from the session after every intent; they carry
//! no state of their own.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{ValueEntry, ValuesCatalog};
use crate::domain::foundation::AssessmentId;
use crate::domain::results::{assemble, ResultsView};

use super::{AssessmentSession, WizardSettings, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableValue {
    pub value: ValueEntry,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOption {
    pub rank: usize,
    pub value: ValueEntry,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionPrompt {
    pub rank: usize,
    pub value: ValueEntry,
    pub text: Option<String>,
    pub max_chars: usize,
}

/// Step-specific screen content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepContent {
    Introduction {
        value_count: usize,
        min_selection: usize,
    },
    Selection {
        options: Vec<SelectableValue>,
        selected_count: usize,
        min_selection: usize,
    },
    Prioritization {
        ranked: Vec<RankedOption>,
    },
    Reflection {
        items: Vec<ReflectionPrompt>,
    },
    Results {
        results: ResultsView,
        show_visualizations: bool,
        can_export: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub assessment_id: AssessmentId,
    pub step: WizardStep,
    /// 1-based position in the sequence.
    pub step_number: usize,
    pub total_steps: usize,
    pub title: String,
    pub furthest_step: WizardStep,
    pub can_go_back: bool,
    pub can_go_next: bool,
    /// Why `next` is currently blocked, if it is.
    pub deficiency: Option<String>,
    pub content: StepContent,
}

impl StepView {
    /// Projects the session's current step.
    ///
    /// `premium_visualizations` is the feature switch; visualizations are
    /// shown only when it is on and the user is premium.
    pub fn project(
        session: &AssessmentSession,
        catalog: &ValuesCatalog,
        settings: &WizardSettings,
        premium_visualizations: bool,
    ) -> Self {
        let step = session.current_step();
        let deficiency = session.precondition_deficiency(settings);
        let content = match step {
            WizardStep::Introduction => StepContent::Introduction {
                value_count: catalog.len(),
                min_selection: settings.required_selection(),
            },
            WizardStep::Selection => StepContent::Selection {
                options: catalog
                    .list()
                    .iter()
                    .map(|entry| SelectableValue {
                        value: entry.clone(),
                        selected: session.is_selected(entry.id()),
                    })
                    .collect(),
                selected_count: session.selected_value_ids().len(),
                min_selection: settings.required_selection(),
            },
            WizardStep::Prioritization => {
                let total = session.prioritized_value_ids().len();
                StepContent::Prioritization {
                    ranked: ranked_entries(session, catalog)
                        .map(|(index, entry)| RankedOption {
                            rank: index + 1,
                            value: entry.clone(),
                            can_move_up: index > 0,
                            can_move_down: index + 1 < total,
                        })
                        .collect(),
                }
            }
            WizardStep::Reflection => StepContent::Reflection {
                items: ranked_entries(session, catalog)
                    .map(|(index, entry)| ReflectionPrompt {
                        rank: index + 1,
                        value: entry.clone(),
                        text: session.reflection(entry.id()).map(str::to_string),
                        max_chars: settings.reflection_max_chars,
                    })
                    .collect(),
            },
            WizardStep::Results => {
                let results = assemble(session, catalog);
                let has_results = !results.is_empty();
                StepContent::Results {
                    results,
                    show_visualizations: premium_visualizations
                        && session.is_premium_user()
                        && has_results,
                    can_export: session.is_premium_user() && has_results,
                }
            }
        };

        Self {
            assessment_id: session.id(),
            step,
            step_number: step.order_index() + 1,
            total_steps: WizardStep::all().len(),
            title: step.display_name().to_string(),
            furthest_step: session.furthest_step(),
            can_go_back: step.previous().is_some(),
            can_go_next: deficiency.is_none(),
            deficiency,
            content,
        }
    }
}

fn ranked_entries<'a>(
    session: &'a AssessmentSession,
    catalog: &'a ValuesCatalog,
) -> impl Iterator<Item = (usize, &'a ValueEntry)> + 'a {
    session
        .prioritized_value_ids()
        .iter()
        .filter_map(move |id| catalog.get(id))
        .enumerate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValueId;

    fn id(s: &str) -> ValueId {
        ValueId::new(s).unwrap()
    }

    #[test]
    fn introduction_view_counts_catalog() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let session = AssessmentSession::new(false);

        let view = StepView::project(&session, &catalog, &WizardSettings::default(), true);

        assert_eq!(view.step_number, 1);
        assert_eq!(view.total_steps, 5);
        assert!(!view.can_go_back);
        assert!(view.can_go_next);
        assert_eq!(
            view.content,
            StepContent::Introduction {
                value_count: catalog.len(),
                min_selection: 3
            }
        );
    }

    #[test]
    fn selection_view_reports_deficiency() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let settings = WizardSettings::default();
        let mut session = AssessmentSession::new(false);
        session.advance(&catalog, &settings).unwrap();
        session.select(&catalog, &id("honesty")).unwrap();

        let view = StepView::project(&session, &catalog, &settings, true);

        assert!(!view.can_go_next);
        assert!(view.deficiency.is_some());
        match view.content {
            StepContent::Selection {
                options,
                selected_count,
                ..
            } => {
                assert_eq!(selected_count, 1);
                assert_eq!(options.len(), catalog.len());
                assert!(options.iter().any(|o| o.selected && o.value.id() == &id("honesty")));
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn prioritization_view_marks_boundaries() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let settings = WizardSettings::new(1, 100);
        let mut session = AssessmentSession::new(false);
        session.advance(&catalog, &settings).unwrap();
        session.select(&catalog, &id("honesty")).unwrap();
        session.select(&catalog, &id("family")).unwrap();
        session.advance(&catalog, &settings).unwrap();

        let view = StepView::project(&session, &catalog, &settings, true);

        match view.content {
            StepContent::Prioritization { ranked } => {
                assert!(!ranked[0].can_move_up);
                assert!(ranked[0].can_move_down);
                assert!(ranked[1].can_move_up);
                assert!(!ranked[1].can_move_down);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn results_view_gates_visualizations_on_premium() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let settings = WizardSettings::new(1, 100);
        let mut session = AssessmentSession::new(false);
        session.advance(&catalog, &settings).unwrap();
        session.select(&catalog, &id("honesty")).unwrap();
        for _ in 0..3 {
            session.advance(&catalog, &settings).unwrap();
        }

        let free = StepView::project(&session, &catalog, &settings, true);
        assert!(matches!(
            free.content,
            StepContent::Results {
                show_visualizations: false,
                can_export: false,
                ..
            }
        ));

        session.set_premium(true);
        let premium = StepView::project(&session, &catalog, &settings, true);
        assert!(matches!(
            premium.content,
            StepContent::Results {
                show_visualizations: true,
                can_export: true,
                ..
            }
        ));
        assert!(!premium.can_go_next);
    }
}
