//! Results export configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Pandoc executable; searched on `PATH` when unset
    pub pandoc_path: Option<String>,

    /// Limit for a single PDF conversion
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ExportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidExportTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
