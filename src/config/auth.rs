//! Authentication configuration
//!
//! Sign-in is a local flag; the only tunable is how long callers wait
//! for the capability to become ready.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Maximum wait for the auth capability to report ready
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_ms: u64,
}

impl AuthConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ready_timeout_ms == 0 {
            return Err(ValidationError::InvalidAuthTimeout);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            ready_timeout_ms: default_ready_timeout(),
        }
    }
}

fn default_ready_timeout() -> u64 {
    5000
}
