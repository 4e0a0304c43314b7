//! AssessmentWizard - the navigation controller.
//!
//! The wizard owns the session exclusively. Every user intent goes through
//! it: the session validates and mutates, then the wizard checkpoints the
//! session, broadcasts step changes and announces the outcome. Renderers
//! only ever see a `StepView`.
//!
//! Persistence and event delivery are fire-and-forget. Their failures are
//! logged and announced; the session carries on in memory.

use std::sync::Arc;

use crate::domain::announcement::Announcement;
use crate::domain::assessment::{
    AssessmentError, AssessmentSession, MoveOutcome, SelectionChange, StepChanged, StepTransition,
    StepView, UserIntent, WizardSettings, WizardStep,
};
use crate::domain::catalog::ValuesCatalog;
use crate::domain::foundation::{AssessmentId, SerializableDomainEvent, ValueId};
use crate::domain::results::{assemble, ResultsView};
use crate::ports::{Announcer, EventPublisher, Screen, StepRenderer};

use super::SessionStore;

/// Collaborators shared by every wizard instance.
#[derive(Clone)]
pub struct WizardContext {
    pub catalog: Arc<ValuesCatalog>,
    pub settings: WizardSettings,
    /// Feature switch for premium visualizations.
    pub premium_visualizations: bool,
    pub publisher: Arc<dyn EventPublisher>,
    pub announcer: Arc<dyn Announcer>,
    pub renderer: Arc<dyn StepRenderer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved(StepTransition),
    /// Nothing to do, e.g. `previous` at the introduction.
    Unchanged,
}

/// What an applied intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Navigation(NavigationOutcome),
    Selection(SelectionChange),
    Move(MoveOutcome),
    ReflectionSaved,
}

pub struct AssessmentWizard {
    ctx: WizardContext,
    store: SessionStore,
    session: AssessmentSession,
    persistence_degraded: bool,
}

impl AssessmentWizard {
    /// Starts a fresh assessment at the introduction.
    pub fn new(ctx: WizardContext, store: SessionStore, is_premium_user: bool) -> Self {
        Self::from_session(ctx, store, AssessmentSession::new(is_premium_user))
    }

    /// Wraps an existing session as-is.
    pub fn from_session(ctx: WizardContext, store: SessionStore, session: AssessmentSession) -> Self {
        Self {
            ctx,
            store,
            session,
            persistence_degraded: false,
        }
    }

    /// Continues a saved assessment, or starts fresh if there is none.
    ///
    /// An unreadable save is reported and replaced by a fresh session.
    pub async fn resume(ctx: WizardContext, store: SessionStore, is_premium_user: bool) -> Self {
        let mut wizard = Self::new(ctx, store, is_premium_user);

        match wizard.store.load().await {
            Ok(Some(mut saved)) => {
                let step = saved.current_step();
                let dropped = saved.reconcile(&wizard.ctx.catalog, &wizard.ctx.settings);
                if dropped > 0 {
                    tracing::warn!(dropped, "Saved assessment referenced unknown values");
                }
                if saved.current_step() != step {
                    tracing::warn!(
                        saved_step = step.as_str(),
                        step = saved.current_step().as_str(),
                        "Saved assessment rewound to a step it can satisfy"
                    );
                }
                saved.set_premium(is_premium_user);
                tracing::info!(
                    assessment_id = %saved.id(),
                    step = saved.current_step().as_str(),
                    "Resumed saved assessment"
                );
                wizard.session = saved;
            }
            Ok(None) => {}
            Err(e) => wizard.persistence_failed(e),
        }

        wizard
    }

    // ───────────────────────────────────────────────────────────────
    // Read side
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.session.id()
    }

    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    pub fn catalog(&self) -> &ValuesCatalog {
        &self.ctx.catalog
    }

    pub fn view(&self) -> StepView {
        StepView::project(
            &self.session,
            &self.ctx.catalog,
            &self.ctx.settings,
            self.ctx.premium_visualizations,
        )
    }

    /// Renders the current step. A render failure yields the inline error
    /// screen; the session is untouched.
    pub fn screen(&self) -> Screen {
        let view = self.view();
        match self.ctx.renderer.render(&view) {
            Ok(screen) => screen,
            Err(e) => {
                let err = AssessmentError::RenderFailure(e.to_string());
                tracing::warn!(step = view.step.as_str(), error = %err, "Render failed");
                Screen::error(err.user_message())
            }
        }
    }

    pub fn results(&self) -> ResultsView {
        assemble(&self.session, &self.ctx.catalog)
    }

    pub fn set_premium(&mut self, is_premium_user: bool) {
        self.session.set_premium(is_premium_user);
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    pub async fn next(&mut self) -> Result<NavigationOutcome, AssessmentError> {
        match self.session.advance(&self.ctx.catalog, &self.ctx.settings) {
            Ok(transition) => {
                self.after_transition(transition).await;
                Ok(NavigationOutcome::Moved(transition))
            }
            Err(e) => Err(self.reject("next", e)),
        }
    }

    pub async fn previous(&mut self) -> NavigationOutcome {
        match self.session.retreat() {
            Some(transition) => {
                self.after_transition(transition).await;
                NavigationOutcome::Moved(transition)
            }
            None => NavigationOutcome::Unchanged,
        }
    }

    /// Clears everything, including the saved copy.
    pub async fn restart(&mut self) -> NavigationOutcome {
        let transition = self.session.restart();
        tracing::info!(assessment_id = %self.session.id(), "Assessment restarted");

        match self.store.clear().await {
            Ok(()) => self.persistence_restored(),
            Err(e) => self.persistence_failed(e),
        }

        if transition.from == transition.to {
            self.announce(Announcement::polite("Assessment restarted."));
            return NavigationOutcome::Unchanged;
        }
        self.publish(transition).await;
        self.announce(Announcement::polite(format!(
            "Assessment restarted. {}",
            self.step_label(transition.to)
        )));
        NavigationOutcome::Moved(transition)
    }

    pub async fn jump_to(&mut self, step: WizardStep) -> Result<NavigationOutcome, AssessmentError> {
        match self
            .session
            .jump_to(step, &self.ctx.catalog, &self.ctx.settings)
        {
            Ok(Some(transition)) => {
                self.after_transition(transition).await;
                Ok(NavigationOutcome::Moved(transition))
            }
            Ok(None) => Ok(NavigationOutcome::Unchanged),
            Err(e) => Err(self.reject("jump_to", e)),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Selection
    // ───────────────────────────────────────────────────────────────

    pub async fn select(&mut self, id: &ValueId) -> Result<SelectionChange, AssessmentError> {
        let result = self.session.select(&self.ctx.catalog, id);
        self.after_selection("select", id, result).await
    }

    pub async fn deselect(&mut self, id: &ValueId) -> Result<SelectionChange, AssessmentError> {
        let result = self.session.deselect(&self.ctx.catalog, id);
        self.after_selection("deselect", id, result).await
    }

    pub async fn toggle(&mut self, id: &ValueId) -> Result<SelectionChange, AssessmentError> {
        let result = self.session.toggle(&self.ctx.catalog, id);
        self.after_selection("toggle", id, result).await
    }

    // ───────────────────────────────────────────────────────────────
    // Prioritization
    // ───────────────────────────────────────────────────────────────

    pub async fn move_up(&mut self, id: &ValueId) -> Result<MoveOutcome, AssessmentError> {
        let result = self.session.move_up(id);
        self.after_move("move_up", id, result).await
    }

    pub async fn move_down(&mut self, id: &ValueId) -> Result<MoveOutcome, AssessmentError> {
        let result = self.session.move_down(id);
        self.after_move("move_down", id, result).await
    }

    pub async fn move_to(&mut self, id: &ValueId, rank: usize) -> Result<MoveOutcome, AssessmentError> {
        let result = self.session.move_to(id, rank);
        self.after_move("move_to", id, result).await
    }

    // ───────────────────────────────────────────────────────────────
    // Reflection
    // ───────────────────────────────────────────────────────────────

    pub async fn save_reflection(&mut self, id: &ValueId, text: &str) -> Result<(), AssessmentError> {
        let max_chars = self.ctx.settings.reflection_max_chars;
        if let Err(e) = self.session.save_reflection(id, text, max_chars) {
            return Err(self.reject("save_reflection", e));
        }
        self.checkpoint().await;
        self.announce(Announcement::polite(format!(
            "Reflection on {} saved.",
            self.value_name(id)
        )));
        Ok(())
    }

    /// Applies any intent; the single entry point for adapters.
    pub async fn apply(&mut self, intent: UserIntent) -> Result<IntentOutcome, AssessmentError> {
        tracing::debug!(
            assessment_id = %self.session.id(),
            intent = intent.name(),
            step = self.session.current_step().as_str(),
            "Applying intent"
        );

        Ok(match intent {
            UserIntent::Next => IntentOutcome::Navigation(self.next().await?),
            UserIntent::Previous => IntentOutcome::Navigation(self.previous().await),
            UserIntent::Restart => IntentOutcome::Navigation(self.restart().await),
            UserIntent::JumpTo { step } => IntentOutcome::Navigation(self.jump_to(step).await?),
            UserIntent::ToggleValue { value_id } => {
                IntentOutcome::Selection(self.toggle(&value_id).await?)
            }
            UserIntent::SelectValue { value_id } => {
                IntentOutcome::Selection(self.select(&value_id).await?)
            }
            UserIntent::DeselectValue { value_id } => {
                IntentOutcome::Selection(self.deselect(&value_id).await?)
            }
            UserIntent::MoveUp { value_id } => IntentOutcome::Move(self.move_up(&value_id).await?),
            UserIntent::MoveDown { value_id } => {
                IntentOutcome::Move(self.move_down(&value_id).await?)
            }
            UserIntent::MoveTo { value_id, rank } => {
                IntentOutcome::Move(self.move_to(&value_id, rank).await?)
            }
            UserIntent::SaveReflection { value_id, text } => {
                self.save_reflection(&value_id, &text).await?;
                IntentOutcome::ReflectionSaved
            }
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    async fn after_transition(&mut self, transition: StepTransition) {
        tracing::info!(
            assessment_id = %self.session.id(),
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            "Step transition"
        );
        self.checkpoint().await;
        self.publish(transition).await;
        self.announce(Announcement::polite(self.step_label(transition.to)));
    }

    async fn after_selection(
        &mut self,
        intent: &str,
        id: &ValueId,
        result: Result<SelectionChange, AssessmentError>,
    ) -> Result<SelectionChange, AssessmentError> {
        let change = result.map_err(|e| self.reject(intent, e))?;
        let count = self.session.selected_value_ids().len();
        let min = self.ctx.settings.required_selection();
        let name = self.value_name(id);

        match change {
            SelectionChange::Added => {
                self.checkpoint().await;
                self.announce(Announcement::polite(format!(
                    "{} selected. {} of at least {} chosen.",
                    name, count, min
                )));
            }
            SelectionChange::Removed => {
                self.checkpoint().await;
                self.announce(Announcement::polite(format!(
                    "{} removed. {} of at least {} chosen.",
                    name, count, min
                )));
            }
            SelectionChange::Unchanged => {}
        }
        Ok(change)
    }

    async fn after_move(
        &mut self,
        intent: &str,
        id: &ValueId,
        result: Result<MoveOutcome, AssessmentError>,
    ) -> Result<MoveOutcome, AssessmentError> {
        let outcome = result.map_err(|e| self.reject(intent, e))?;
        let name = self.value_name(id);

        let message = match outcome {
            MoveOutcome::Moved { rank, total } => {
                self.checkpoint().await;
                format!("{} moved to position {} of {}.", name, rank, total)
            }
            MoveOutcome::AlreadyFirst => format!("{} is already first.", name),
            MoveOutcome::AlreadyLast => format!("{} is already last.", name),
            MoveOutcome::Unchanged => {
                let rank = self.session.rank_of(id).unwrap_or_default();
                format!("{} is already at position {}.", name, rank)
            }
        };
        self.announce(Announcement::polite(message));
        Ok(outcome)
    }

    /// Announces a rejected intent and hands the error back.
    fn reject(&self, intent: &str, err: AssessmentError) -> AssessmentError {
        tracing::debug!(
            assessment_id = %self.session.id(),
            intent,
            code = %err.code(),
            error = %err,
            "Intent rejected"
        );
        self.announce(Announcement::assertive(err.user_message()));
        err
    }

    async fn checkpoint(&mut self) {
        match self.store.save(&self.session).await {
            Ok(()) => self.persistence_restored(),
            Err(e) => self.persistence_failed(e),
        }
    }

    fn persistence_failed(&mut self, err: AssessmentError) {
        tracing::warn!(
            assessment_id = %self.session.id(),
            key = self.store.key(),
            error = %err,
            "Persistence unavailable; continuing in memory"
        );
        // Announce once per outage, not on every checkpoint.
        if !self.persistence_degraded {
            self.persistence_degraded = true;
            self.announce(Announcement::assertive(err.user_message()));
        }
    }

    fn persistence_restored(&mut self) {
        if self.persistence_degraded {
            self.persistence_degraded = false;
            tracing::info!(key = self.store.key(), "Persistence available again");
        }
    }

    async fn publish(&self, transition: StepTransition) {
        let event = StepChanged::from_transition(self.session.id(), transition);
        let envelope = match event.to_envelope() {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build step change event");
                return;
            }
        };
        if let Err(e) = self.ctx.publisher.publish(envelope).await {
            tracing::warn!(error = %e, "Step change delivery failed");
        }
    }

    fn announce(&self, announcement: Announcement) {
        self.ctx.announcer.announce(announcement);
    }

    fn step_label(&self, step: WizardStep) -> String {
        format!(
            "Step {} of {}: {}",
            step.order_index() + 1,
            WizardStep::all().len(),
            step.display_name()
        )
    }

    fn value_name(&self, id: &ValueId) -> String {
        self.ctx
            .catalog
            .get(id)
            .map(|entry| entry.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
