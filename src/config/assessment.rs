//! Assessment wizard configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::DEFAULT_MAX_LIVE_ASSESSMENTS;
use crate::domain::assessment::{WizardSettings, DEFAULT_MIN_SELECTION, DEFAULT_REFLECTION_MAX_CHARS};

use super::error::ValidationError;

/// Upper bound for `min_selection`; the built-in catalog has twenty values.
const MAX_MIN_SELECTION: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Values required before leaving the selection step
    #[serde(default = "default_min_selection")]
    pub min_selection: usize,

    /// Longest reflection kept, in characters
    #[serde(default = "default_reflection_max_chars")]
    pub reflection_max_chars: usize,

    /// Optional YAML or JSON catalog replacing the built-in values
    pub catalog_path: Option<PathBuf>,

    /// Wizards kept in memory before the least recently used is dropped
    #[serde(default = "default_max_live")]
    pub max_live: usize,
}

impl AssessmentConfig {
    pub fn wizard_settings(&self) -> WizardSettings {
        WizardSettings::new(self.min_selection, self.reflection_max_chars)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_selection == 0 || self.min_selection > MAX_MIN_SELECTION {
            return Err(ValidationError::InvalidMinSelection {
                got: self.min_selection,
                max: MAX_MIN_SELECTION,
            });
        }
        if self.reflection_max_chars == 0 {
            return Err(ValidationError::InvalidReflectionLimit);
        }
        if self.max_live == 0 {
            return Err(ValidationError::InvalidMaxLiveAssessments);
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            min_selection: default_min_selection(),
            reflection_max_chars: default_reflection_max_chars(),
            catalog_path: None,
            max_live: default_max_live(),
        }
    }
}

fn default_min_selection() -> usize {
    DEFAULT_MIN_SELECTION
}

fn default_reflection_max_chars() -> usize {
    DEFAULT_REFLECTION_MAX_CHARS
}

fn default_max_live() -> usize {
    DEFAULT_MAX_LIVE_ASSESSMENTS
}
