//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Show category charts on the results step for premium visitors
    #[serde(default = "default_true")]
    pub premium_visualizations: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            premium_visualizations: true,
            verbose_errors: false,
            enable_tracing: true,
        }
    }
}

fn default_true() -> bool {
    true
}
