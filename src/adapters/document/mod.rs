//! Document adapters.
//!
//! - `PulldownExportService` - Markdown to HTML (pulldown-cmark) and PDF (Pandoc)

mod pulldown_export_service;

pub use pulldown_export_service::PulldownExportService;
