//! Integration tests for the assessment wizard.
//!
//! These tests drive `AssessmentWizard` through the public API with real
//! adapters:
//! 1. The restart and reorder scenarios end to end
//! 2. Saving to a JSON file and resuming in a fresh wizard
//! 3. Step-change events reaching subscribed handlers

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use values_compass::adapters::{
    FileKeyValueStore, InMemoryEventBus, InMemoryKeyValueStore, RecordingAnnouncer,
    TextStepRenderer, STEP_CHANGED,
};
use values_compass::application::{AssessmentWizard, NavigationOutcome, SessionStore, WizardContext};
use values_compass::domain::assessment::{AssessmentError, MoveOutcome, StepContent, WizardSettings, WizardStep};
use values_compass::domain::catalog::ValuesCatalog;
use values_compass::domain::foundation::{DomainError, EventEnvelope, ValueId};
use values_compass::domain::results::ResultsView;
use values_compass::ports::{EventHandler, EventSubscriber, KeyValueStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn context(bus: Arc<InMemoryEventBus>, min_selection: usize) -> WizardContext {
    WizardContext {
        catalog: Arc::new(ValuesCatalog::builtin().unwrap()),
        settings: WizardSettings::new(min_selection, 2000),
        premium_visualizations: true,
        publisher: bus,
        announcer: Arc::new(RecordingAnnouncer::new()),
        renderer: Arc::new(TextStepRenderer),
    }
}

fn id(s: &str) -> ValueId {
    ValueId::new(s).unwrap()
}

fn ranked(wizard: &AssessmentWizard) -> Vec<&str> {
    wizard
        .session()
        .prioritized_value_ids()
        .iter()
        .map(|v| v.as_str())
        .collect()
}

/// Handler that remembers every `(previous, step)` pair it sees.
struct TransitionRecorder {
    seen: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl EventHandler for TransitionRecorder {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let previous = event.payload["previous"].as_str().unwrap_or_default().to_string();
        let step = event.payload["step"].as_str().unwrap_or_default().to_string();
        self.seen.lock().unwrap().push((previous, step));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TransitionRecorder"
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn restart_clears_everything() {
    let bus = Arc::new(InMemoryEventBus::new());
    let store = InMemoryKeyValueStore::new();
    let mut wizard = AssessmentWizard::new(
        context(bus, 2),
        SessionStore::new(Arc::new(store.clone())),
        false,
    );

    wizard.next().await.unwrap();
    wizard.select(&id("honesty")).await.unwrap();
    wizard.select(&id("compassion")).await.unwrap();
    wizard.next().await.unwrap();
    wizard.move_up(&id("compassion")).await.unwrap();
    assert_eq!(ranked(&wizard), vec!["compassion", "honesty"]);

    wizard.restart().await;

    let session = wizard.session();
    assert_eq!(session.current_step(), WizardStep::Introduction);
    assert!(session.selected_value_ids().is_empty());
    assert!(session.prioritized_value_ids().is_empty());
    assert!(session.reflections().is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn reorder_moves_value_to_the_top() {
    let bus = Arc::new(InMemoryEventBus::new());
    let store = InMemoryKeyValueStore::new();
    let mut wizard = AssessmentWizard::new(
        context(bus, 3),
        SessionStore::new(Arc::new(store)),
        false,
    );

    wizard.next().await.unwrap();
    for value in ["honesty", "compassion", "creativity"] {
        wizard.select(&id(value)).await.unwrap();
    }
    wizard.next().await.unwrap();

    // Seeded in catalog order.
    assert_eq!(ranked(&wizard), vec!["honesty", "creativity", "compassion"]);
    wizard.move_to(&id("compassion"), 2).await.unwrap();
    assert_eq!(ranked(&wizard), vec!["honesty", "compassion", "creativity"]);

    let outcome = wizard.move_up(&id("compassion")).await.unwrap();

    assert_eq!(outcome, MoveOutcome::Moved { rank: 1, total: 3 });
    assert_eq!(ranked(&wizard), vec!["compassion", "honesty", "creativity"]);
    assert_eq!(
        wizard.move_up(&id("compassion")).await.unwrap(),
        MoveOutcome::AlreadyFirst
    );
    assert_eq!(
        wizard.move_down(&id("creativity")).await.unwrap(),
        MoveOutcome::AlreadyLast
    );
}

#[tokio::test]
async fn full_walkthrough_produces_results() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut wizard = AssessmentWizard::new(
        context(bus, 1),
        SessionStore::new(Arc::new(InMemoryKeyValueStore::new())),
        true,
    );

    wizard.next().await.unwrap();
    wizard.select(&id("family")).await.unwrap();
    wizard.select(&id("achievement")).await.unwrap();
    wizard.next().await.unwrap();
    wizard.next().await.unwrap();
    wizard
        .save_reflection(&id("family"), "  Sunday dinners with everyone.  ")
        .await
        .unwrap();
    wizard.next().await.unwrap();

    let view = wizard.view();
    assert_eq!(view.step, WizardStep::Results);
    assert!(!view.can_go_next);
    match view.content {
        StepContent::Results {
            results,
            show_visualizations,
            ..
        } => {
            assert!(show_visualizations);
            assert_eq!(results.top_value().map(|v| v.value.name()), Some("Family"));
        }
        other => panic!("expected results content, got {:?}", other),
    }

    match wizard.results() {
        ResultsView::Ready { ranked, next_steps, .. } => {
            assert_eq!(ranked[0].reflection.as_deref(), Some("Sunday dinners with everyone."));
            assert_eq!(next_steps.len(), 3);
        }
        ResultsView::Empty { .. } => panic!("expected ready results"),
    }

    let err = wizard.next().await.unwrap_err();
    assert!(matches!(err, AssessmentError::PreconditionNotMet { .. }));
}

#[tokio::test]
async fn jump_back_and_forward_between_visited_steps() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut wizard = AssessmentWizard::new(
        context(bus, 1),
        SessionStore::new(Arc::new(InMemoryKeyValueStore::new())),
        false,
    );

    let err = wizard.jump_to(WizardStep::Selection).await.unwrap_err();
    assert!(matches!(err, AssessmentError::StepNotVisited { .. }));

    wizard.next().await.unwrap();
    wizard.select(&id("health")).await.unwrap();
    wizard.next().await.unwrap();
    wizard.next().await.unwrap();

    let back = wizard.jump_to(WizardStep::Selection).await.unwrap();
    assert!(matches!(back, NavigationOutcome::Moved(_)));
    let forward = wizard.jump_to(WizardStep::Reflection).await.unwrap();
    assert!(matches!(forward, NavigationOutcome::Moved(_)));
    assert_eq!(wizard.session().current_step(), WizardStep::Reflection);

    let err = wizard.jump_to(WizardStep::Results).await.unwrap_err();
    assert!(matches!(err, AssessmentError::StepNotVisited { .. }));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn session_survives_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compass.json");

    let saved = {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&path));
        let bus = Arc::new(InMemoryEventBus::new());
        let mut wizard = AssessmentWizard::new(context(bus, 1), SessionStore::new(store), false);
        wizard.next().await.unwrap();
        wizard.select(&id("justice")).await.unwrap();
        wizard.select(&id("community")).await.unwrap();
        wizard.next().await.unwrap();
        wizard.move_down(&id("justice")).await.unwrap();
        wizard.session().clone()
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&path));
    let bus = Arc::new(InMemoryEventBus::new());
    let resumed = AssessmentWizard::resume(context(bus, 1), SessionStore::new(store), false).await;

    assert_eq!(resumed.session(), &saved);
    assert_eq!(ranked(&resumed), vec!["community", "justice"]);
}

#[tokio::test]
async fn unreadable_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compass.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&path));
    let bus = Arc::new(InMemoryEventBus::new());
    let wizard = AssessmentWizard::resume(context(bus, 1), SessionStore::new(store), false).await;

    assert_eq!(wizard.session().current_step(), WizardStep::Introduction);
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn step_changes_reach_subscribers_in_order() {
    let bus = Arc::new(InMemoryEventBus::new());
    let recorder = Arc::new(TransitionRecorder {
        seen: Mutex::new(Vec::new()),
    });
    bus.subscribe(STEP_CHANGED, recorder.clone());

    let mut wizard = AssessmentWizard::new(
        context(bus.clone(), 1),
        SessionStore::new(Arc::new(InMemoryKeyValueStore::new())),
        false,
    );
    wizard.next().await.unwrap();
    wizard.previous().await;

    let seen = recorder.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("introduction".to_string(), "selection".to_string()),
            ("selection".to_string(), "introduction".to_string()),
        ]
    );
    assert_eq!(bus.events_of_type(STEP_CHANGED).len(), 2);
}
