//! Export error types.

use thiserror::Error;

/// Errors that can occur while exporting results.
///
/// All variants are recoverable; the dialog closes and the user may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Export requires a premium account")]
    PremiumRequired,

    #[error("An export is already in progress")]
    AlreadyInProgress,

    #[error("Export was cancelled")]
    Cancelled,

    #[error("No export is running")]
    NotRunning,

    #[error("There are no ranked values to export")]
    NothingToExport,

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (e.g. Pandoc) is not available.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Conversion to {format} failed: {reason}")]
    Conversion { format: String, reason: String },

    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn conversion(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Message suitable for the export dialog and the live region.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::PremiumRequired => {
                "Exporting your results is a premium feature.".to_string()
            }
            ExportError::AlreadyInProgress => {
                "An export is already running. Please wait for it to finish.".to_string()
            }
            ExportError::Cancelled => "Export cancelled.".to_string(),
            ExportError::NotRunning => "There is no export to cancel.".to_string(),
            ExportError::NothingToExport => {
                "Rank at least one value before exporting.".to_string()
            }
            ExportError::UnsupportedFormat(format) => {
                format!("Export to {} is not supported.", format)
            }
            ExportError::ServiceUnavailable(_)
            | ExportError::Conversion { .. }
            | ExportError::Timeout(_) => {
                "The export could not be completed. Please try again.".to_string()
            }
        }
    }
}
