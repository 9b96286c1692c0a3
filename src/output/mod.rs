//! Output module for rendering audit reports
//!
//! This module handles:
//! - Serializing audit results and error payloads as JSON
//! - Generating markdown reports
//! - Writing reports to stdout or a file

mod json;
mod markdown;
mod traits;

pub use json::{render_error_json, render_json, ErrorPayload};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use traits::{OutputError, OutputResult, ReportFormat};

use crate::audit::AuditResult;
use std::path::Path;

/// Renders a result in the requested format
pub fn render_report(result: &AuditResult, format: ReportFormat) -> OutputResult<String> {
    match format {
        ReportFormat::Json => render_json(result),
        ReportFormat::Markdown => Ok(format_markdown_report(result)),
    }
}

/// Renders a result and writes it to `path`, or to stdout when no path is given
pub fn write_report(
    result: &AuditResult,
    format: ReportFormat,
    path: Option<&Path>,
) -> OutputResult<()> {
    match (format, path) {
        (ReportFormat::Markdown, Some(path)) => generate_markdown_report(result, path),
        (_, Some(path)) => Ok(std::fs::write(path, render_report(result, format)?)?),
        (_, None) => {
            println!("{}", render_report(result, format)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{PageFacts, ScoreSet};
    use tempfile::NamedTempFile;

    fn result() -> AuditResult {
        AuditResult {
            url: "https://example.com/".to_string(),
            scores: ScoreSet::default(),
            page_facts: PageFacts::default(),
            explanation: "AI response not available.".to_string(),
        }
    }

    #[test]
    fn test_render_report_formats() {
        let json = render_report(&result(), ReportFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let md = render_report(&result(), ReportFormat::Markdown).unwrap();
        assert!(md.starts_with("# SEO Audit Report"));
    }

    #[test]
    fn test_write_json_report_to_file() {
        let file = NamedTempFile::new().unwrap();
        write_report(&result(), ReportFormat::Json, Some(file.path())).unwrap();

        let written: AuditResult =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(written, result());
    }
}
