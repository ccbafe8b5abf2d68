//! Summary rendering.
//!
//! Produces the terminal, Markdown and JSON views of a summarize reply.

use super::badge::Badge;
use crate::models::{DisplaySection, SummarizeResponse};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// Plain terminal view.
pub fn render_text(response: &SummarizeResponse, status_line: &str) -> String {
    let mut output = String::new();

    output.push_str("🔒 Privacy Policy Summary\n\n");

    for (heading, section) in response.summary.sections() {
        output.push_str(&render_text_section(heading, section));
    }

    if !response.summary.excerpt.is_empty() {
        output.push_str(&format!("📄 Excerpt: {}\n\n", response.summary.excerpt));
    }

    if !status_line.is_empty() {
        output.push_str(status_line);
        output.push('\n');
    }

    output
}

fn render_text_section(heading: &str, section: &DisplaySection) -> String {
    let badge = Badge::from_severity(&section.severity).render();
    if badge.is_empty() {
        format!("{}\n   {}\n\n", heading, section.text)
    } else {
        format!("{}  [{}]\n   {}\n\n", heading, badge, section.text)
    }
}

/// Markdown document with a small metadata block.
pub fn render_markdown(response: &SummarizeResponse, generated_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("# Privacy Policy Summary\n\n");
    output.push_str(&format!(
        "- **Generated:** {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !response.ok {
        output.push_str("- **Source:** sample summary (analysis service unavailable)\n");
    }
    output.push('\n');

    output.push_str("| Dimension | Severity |\n");
    output.push_str("|-----------|----------|\n");
    for (heading, section) in response.summary.sections() {
        output.push_str(&format!(
            "| {} | {} |\n",
            heading,
            Badge::from_severity(&section.severity).render()
        ));
    }
    output.push('\n');

    for (heading, section) in response.summary.sections() {
        output.push_str(&format!("## {}\n\n{}\n\n", heading, section.text));
    }

    if !response.summary.excerpt.is_empty() {
        output.push_str("## Excerpt\n\n");
        for line in response.summary.excerpt.lines() {
            output.push_str(&format!("> {}\n", line));
        }
        output.push('\n');
    }

    output
}

/// Full reply as pretty JSON.
pub fn render_json(response: &SummarizeResponse) -> Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize summary to JSON")
}

/// Write a rendered summary to a file.
pub fn write_output(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::mock_summary;
    use crate::models::{DisplaySection, DisplaySummary};

    fn create_test_response() -> SummarizeResponse {
        SummarizeResponse {
            ok: true,
            summary: DisplaySummary {
                collection: DisplaySection::new("Email, location", "medium"),
                sharing: DisplaySection::new("Shared with partners.", "urgent"),
                retention: DisplaySection::new("Not specified", ""),
                overall_risk: DisplaySection::new("Overall privacy risk: High.", "high"),
                excerpt: "We collect your email.\nWe share it.".to_string(),
            },
            error: None,
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&create_test_response(), "Summary generated.");

        assert!(text.contains("Data Collection  [🟡 MEDIUM]"));
        assert!(text.contains("Data Sharing  [urgent]"));
        assert!(text.contains("Data Retention\n   Not specified"));
        assert!(text.contains("🔴 HIGH"));
        assert!(text.ends_with("Summary generated.\n"));
    }

    #[test]
    fn test_render_markdown() {
        let markdown = render_markdown(&create_test_response(), Utc::now());

        assert!(markdown.contains("# Privacy Policy Summary"));
        assert!(markdown.contains("| Data Collection | 🟡 MEDIUM |"));
        assert!(markdown.contains("## Overall Risk"));
        assert!(markdown.contains("> We share it."));
        assert!(!markdown.contains("sample summary"));
    }

    #[test]
    fn test_render_markdown_marks_fallback() {
        let response = SummarizeResponse {
            ok: false,
            summary: mock_summary("policy", 300),
            error: Some("Configuration error".to_string()),
        };
        let markdown = render_markdown(&response, Utc::now());
        assert!(markdown.contains("sample summary"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&create_test_response()).unwrap();

        assert!(json.contains("\"ok\": true"));
        assert!(json.contains("\"overallRisk\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        write_output("# hi\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
