//! Pulldown-cmark based export service adapter.
//!
//! - HTML conversion using pulldown-cmark (pure Rust)
//! - PDF conversion using Pandoc (requires an external Pandoc installation)

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Event, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{DocumentExportService, ExportError};

const DEFAULT_TITLE: &str = "My Values Compass";

/// Export service using pulldown-cmark for HTML and Pandoc for PDF.
///
/// If Pandoc is missing, PDF conversion fails with
/// `ExportError::ServiceUnavailable`; HTML keeps working.
///
/// ```rust,ignore
/// let service = PulldownExportService::new().with_pdf_timeout(10);
/// let html = service.to_html("# My Values Compass\n\n1. **Honesty**").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,
    pdf_timeout_secs: u64,
    include_default_css: bool,
}

impl PulldownExportService {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: 30,
            include_default_css: true,
        }
    }

    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs.max(1);
        self
    }

    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn wrap_html(&self, body: String, title: &str) -> String {
        let css = if self.include_default_css {
            DEFAULT_CSS
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <main class="values-results">
{body}
    </main>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body
        )
    }

    /// First level-one heading, or the default title.
    fn extract_title(&self, markdown: &str) -> String {
        markdown
            .lines()
            .find_map(|line| line.trim().strip_prefix("# "))
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    async fn check_pandoc(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(
                "Pandoc is not installed; PDF export requires Pandoc",
            ));
        }

        let mut child = Command::new(self.pandoc_command())
            .args(["-f", "markdown", "-t", "pdf", "-V", "geometry:margin=1in"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::conversion("pdf", format!("failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::conversion("pdf", format!("failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::conversion("pdf", format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::conversion("pdf", stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let options = Options::ENABLE_TABLES | Options::ENABLE_SMART_PUNCTUATION;
        // Raw HTML in the source is shown as text, never emitted as markup.
        let parser = Parser::new_ext(markdown, options).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });

        let mut body = String::new();
        html::push_html(&mut body, parser);

        let title = self.extract_title(markdown);
        Ok(self.wrap_html(body, &title))
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DEFAULT_CSS: &str = r#"
body { font-family: system-ui, sans-serif; line-height: 1.6; color: #1f2937; max-width: 46rem; margin: 0 auto; padding: 2rem; }
h1 { border-bottom: 2px solid #0f766e; padding-bottom: .4rem; }
h2 { margin-top: 2rem; color: #0f766e; }
blockquote { margin: .5rem 0 0 0; padding: .25rem 1rem; border-left: 4px solid #99f6e4; color: #4b5563; }
table { border-collapse: collapse; }
th, td { border: 1px solid #e5e7eb; padding: .35rem .75rem; text-align: left; }
@media print { body { padding: 0; font-size: 11pt; } h2 { page-break-after: avoid; } }
"#;
