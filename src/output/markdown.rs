//! Markdown report generation
//!
//! This module renders a human-readable audit report: the three scores, the
//! SEO checks behind the SEO score, the extracted page facts, and the
//! language-model explanation.

use crate::audit::{seo_checks, AuditResult};
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const CHECK_LABELS: [&str; 4] = [
    "Title length is 10-60 characters",
    "Meta description length is 50-160 characters",
    "Page has an H1 heading",
    "Fewer than 30% of images lack alt text",
];

/// Writes a markdown report to `output_path`
///
/// # Arguments
///
/// * `result` - The completed audit
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(result: &AuditResult, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(result);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit result as markdown
pub fn format_markdown_report(result: &AuditResult) -> String {
    let mut md = String::new();
    let facts = &result.page_facts;

    md.push_str("# SEO Audit Report\n\n");
    md.push_str(&format!("**URL**: {}\n\n", result.url));

    // Scores
    md.push_str("## Scores\n\n");
    md.push_str("| Score | Value |\n");
    md.push_str("|-------|-------|\n");
    md.push_str(&format!("| Overall | {}/100 |\n", result.scores.overall));
    md.push_str(&format!("| Performance | {}/100 |\n", result.scores.performance));
    md.push_str(&format!("| SEO | {}/100 |\n\n", result.scores.seo));

    // SEO checks
    md.push_str("## SEO Checks\n\n");
    for (label, passed) in CHECK_LABELS.iter().zip(seo_checks(facts)) {
        let mark = if passed { "x" } else { " " };
        md.push_str(&format!("- [{}] {}\n", mark, label));
    }
    md.push('\n');

    // Page facts
    md.push_str("## On-Page Details\n\n");
    md.push_str(&format!("- **Title**: {}\n", or_missing(&facts.title)));
    md.push_str(&format!(
        "- **Meta Description**: {}\n",
        or_missing(&facts.meta_description)
    ));
    md.push_str(&format!("- **H1**: {}\n", or_missing(&facts.first_h1)));
    md.push_str(&format!(
        "- **Images**: {} ({} without alt text)\n",
        facts.image_count, facts.images_missing_alt
    ));
    md.push_str(&format!(
        "- **Canonical**: {}\n",
        or_missing(&facts.canonical_url)
    ));
    md.push_str(&format!(
        "- **Robots Meta**: {}\n\n",
        or_missing(&facts.robots_directive)
    ));

    // Explanation
    md.push_str("## AI Explanation\n\n");
    md.push_str(result.explanation.trim());
    md.push('\n');

    md
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        "_(missing)_"
    } else {
        value
    }
}
