//! Document Export Service Port - Format conversion interface.
//!
//! Converts the Markdown results document into other formats. The
//! application depends on this trait; adapters (like
//! `PulldownExportService`) provide the conversion.

use async_trait::async_trait;

pub use crate::domain::export::{ExportError, ExportFormat, ExportedDocument};

/// Port for exporting markdown documents to other formats.
///
/// # Contract
///
/// Implementations must:
/// - Convert valid markdown to the target format
/// - Report clear errors for conversion failures
/// - Bound external process time and report `ExportError::Timeout`
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Convert markdown content to PDF bytes.
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Convert markdown to a complete HTML document.
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError>;

    /// Whether external converters (like Pandoc) are usable.
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_export_service_is_object_safe() {
        fn check<T: DocumentExportService + ?Sized>() {}
        check::<dyn DocumentExportService>();
    }
}
