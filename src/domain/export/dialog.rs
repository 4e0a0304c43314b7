//! ExportDialog - view-model for the modal shown while an export runs.
//!
//! The dialog traps keyboard focus exactly while it is open. Every way out
//! of an export (success, failure, cancellation) closes it and releases the
//! trap.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::{ExportError, ExportFormat};

/// Lifecycle of one export attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Idle,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl ExportStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ExportStatus::InProgress)
    }
}

impl Default for ExportStatus {
    fn default() -> Self {
        ExportStatus::Idle
    }
}

impl StateMachine for ExportStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ExportStatus::*;
        match self {
            InProgress => vec![Completed, Failed, Cancelled],
            Idle | Completed | Failed | Cancelled => vec![InProgress],
        }
    }
}

/// Coarse progress checkpoints reported by the export task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStage {
    Assembled,
    Composed,
    Converted,
    Done,
}

impl ExportStage {
    pub fn percent(&self) -> u8 {
        match self {
            ExportStage::Assembled => 10,
            ExportStage::Composed => 40,
            ExportStage::Converted => 80,
            ExportStage::Done => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportDialog {
    pub open: bool,
    pub focus_trapped: bool,
    /// 0..=100, never decreases during one attempt.
    pub progress: u8,
    pub status: ExportStatus,
    pub format: Option<ExportFormat>,
    /// Outcome text shown after the dialog closes.
    pub message: Option<String>,
}

impl ExportDialog {
    /// Opens the dialog for a new attempt.
    pub fn begin(&mut self, format: ExportFormat) -> Result<(), ExportError> {
        if self.status.is_in_progress() {
            return Err(ExportError::AlreadyInProgress);
        }
        self.status = self
            .status
            .transition_to(ExportStatus::InProgress)
            .map_err(|_| ExportError::AlreadyInProgress)?;
        self.open = true;
        self.focus_trapped = true;
        self.progress = 0;
        self.format = Some(format);
        self.message = None;
        Ok(())
    }

    /// Records a checkpoint. Ignored once the attempt has ended.
    pub fn report(&mut self, stage: ExportStage) {
        if self.status.is_in_progress() {
            self.progress = self.progress.max(stage.percent());
        }
    }

    pub fn complete(&mut self) {
        self.progress = ExportStage::Done.percent();
        self.finish(ExportStatus::Completed, "Your results are ready to download.".to_string());
    }

    pub fn fail(&mut self, error: &ExportError) {
        let status = match error {
            ExportError::Cancelled => ExportStatus::Cancelled,
            _ => ExportStatus::Failed,
        };
        self.finish(status, error.user_message());
    }

    pub fn cancel(&mut self) {
        self.fail(&ExportError::Cancelled);
    }

    fn finish(&mut self, status: ExportStatus, message: String) {
        if let Ok(next) = self.status.transition_to(status) {
            self.status = next;
            self.message = Some(message);
        }
        self.open = false;
        self.focus_trapped = false;
    }
}
