//! Tunables for the wizard's step requirements.

use serde::{Deserialize, Serialize};

/// Default minimum number of values to select before prioritizing.
pub const DEFAULT_MIN_SELECTION: usize = 3;

/// Default cap on a single reflection's length, in characters.
pub const DEFAULT_REFLECTION_MAX_CHARS: usize = 2000;

/// Requirements applied by the wizard's forward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSettings {
    /// Values required to leave the selection step. Never below 1.
    pub min_selection: usize,
    /// Reflections longer than this are truncated on save.
    pub reflection_max_chars: usize,
}

impl WizardSettings {
    pub fn new(min_selection: usize, reflection_max_chars: usize) -> Self {
        Self {
            min_selection: min_selection.max(1),
            reflection_max_chars,
        }
    }

    /// Selection minimum actually enforced, even when `min_selection` was
    /// set to zero directly or through deserialization.
    pub fn required_selection(&self) -> usize {
        self.min_selection.max(1)
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SELECTION, DEFAULT_REFLECTION_MAX_CHARS)
    }
}
