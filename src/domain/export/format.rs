//! Export formats and the exported document payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Raw markdown (no conversion needed).
    Markdown,
    Html,
    Pdf,
}

impl ExportFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Markdown
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A finished export ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_aliases_case_insensitively() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("htm".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn rejects_unknown_format() {
        assert_eq!(
            "docx".parse::<ExportFormat>().unwrap_err(),
            ExportError::UnsupportedFormat("docx".to_string())
        );
    }

    #[test]
    fn document_filename_uses_format_extension() {
        let doc = ExportedDocument::new(b"%PDF".to_vec(), ExportFormat::Pdf, "my-values");
        assert_eq!(doc.filename, "my-values.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }
}
