//! Export module - turning results into a downloadable document.
//!
//! The domain side holds the dialog view-model, the supported formats and
//! the Markdown composition. Format conversion lives behind the
//! `DocumentExportService` port.

mod dialog;
mod document;
mod errors;
mod format;

pub use dialog::{ExportDialog, ExportStage, ExportStatus};
pub use document::{compose_markdown, escape_markdown, export_base_filename};
pub use errors::ExportError;
pub use format::{ExportFormat, ExportedDocument};
