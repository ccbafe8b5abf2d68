//! Data models for the policy summarizer.
//!
//! This module contains the wire shapes exchanged with the analysis
//! service, the normalized summary consumed by the terminal UI, and the
//! internal message protocol between the UI and the background worker.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Placeholder substituted when the user submits only whitespace.
pub const EMPTY_TEXT_PLACEHOLDER: &str = "No text provided.";

/// Default used when the service omits a dimension's details.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Default used when the service omits a severity or the aggregate risk.
pub const UNKNOWN: &str = "Unknown";

/// Coarse qualitative risk label attached to a policy dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Little or no privacy concern.
    Low,
    /// Some concern worth reading about.
    Medium,
    /// Significant privacy concern.
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

impl Severity {
    /// Parse a severity label case-insensitively.
    ///
    /// Returns `None` for anything outside Low/Medium/High, including
    /// `"Unknown"` and the empty string.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    /// Lower-case label used in display summaries.
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Returns an emoji representation of the severity.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Low => "🟢",
            Severity::Medium => "🟡",
            Severity::High => "🔴",
        }
    }

    /// Normalize an arbitrary JSON value into a display severity label.
    ///
    /// Always one of `"low"`, `"medium"`, `"high"` or `""`.
    pub fn normalize(value: Option<&Value>) -> String {
        value
            .and_then(Value::as_str)
            .and_then(Severity::parse)
            .map(|s| s.as_label().to_string())
            .unwrap_or_default()
    }
}

/// Body sent to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub policy_text: String,
}

/// One named dimension as produced by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDimension {
    pub details: String,
    pub severity: String,
}

/// The `summary` record of a successful service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub data_collecting: RiskDimension,
    pub data_sharing: RiskDimension,
    pub data_retention: RiskDimension,
    pub overall_privacy_risk: String,
}

impl ServiceSummary {
    /// Shape a model's JSON opinion into the service summary.
    ///
    /// Missing details become "Not specified"; missing severities and a
    /// missing aggregate become "Unknown".
    pub fn from_model_output(output: &Value) -> Self {
        let dimension = |key: &str| {
            let record = output.get(key);
            RiskDimension {
                details: record
                    .and_then(|r| r.get("details"))
                    .and_then(Value::as_str)
                    .unwrap_or(NOT_SPECIFIED)
                    .to_string(),
                severity: record
                    .and_then(|r| r.get("severity"))
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN)
                    .to_string(),
            }
        };

        Self {
            data_collecting: dimension("data_collecting"),
            data_sharing: dimension("data_sharing"),
            data_retention: dimension("data_retention"),
            overall_privacy_risk: output
                .get("overall_privacy_risk")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN)
                .to_string(),
        }
    }
}

/// Status discriminator of service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Success,
    Error,
}

/// Body returned by the analysis service, success or error.
///
/// The client reads it as loose JSON; this type is what the service
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ServiceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceResponse {
    pub fn success(summary: ServiceSummary) -> Self {
        Self {
            status: ServiceStatus::Success,
            summary: Some(summary),
            message: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status: ServiceStatus::Error,
            summary: None,
            message: Some(message.into()),
            error,
        }
    }
}

/// One rendered section: a sentence and a normalized severity label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySection {
    pub text: String,
    /// One of `"low"`, `"medium"`, `"high"` or `""`.
    pub severity: String,
}

impl DisplaySection {
    pub fn new(text: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: severity.into(),
        }
    }
}

/// Summary shape consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    pub collection: DisplaySection,
    pub sharing: DisplaySection,
    pub retention: DisplaySection,
    pub overall_risk: DisplaySection,
    /// Leading part of the text the user submitted.
    pub excerpt: String,
}

impl DisplaySummary {
    /// Sections in display order, paired with their headings.
    pub fn sections(&self) -> [(&'static str, &DisplaySection); 4] {
        [
            ("Data Collection", &self.collection),
            ("Data Sharing", &self.sharing),
            ("Data Retention", &self.retention),
            ("Overall Risk", &self.overall_risk),
        ]
    }
}

/// Messages accepted by the background worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    #[serde(rename = "SUMMARIZE_POLICY")]
    SummarizePolicy { text: String },
}

/// Reply to a `SUMMARIZE_POLICY` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// False when the summary is the fixed fallback.
    pub ok: bool,
    pub summary: DisplaySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Truncate to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Excerpt of the submitted text, with `...` appended when it was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let cut = truncate_chars(trimmed, max_chars);
    if cut.len() < trimmed.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("Low"), Some(Severity::Low));
        assert_eq!(Severity::parse("MEDIUM"), Some(Severity::Medium));
        assert_eq!(Severity::parse(" high "), Some(Severity::High));
        assert_eq!(Severity::parse("Unknown"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn test_severity_normalize() {
        assert_eq!(Severity::normalize(Some(&json!("High"))), "high");
        assert_eq!(Severity::normalize(Some(&json!("urgent"))), "");
        assert_eq!(Severity::normalize(Some(&json!(3))), "");
        assert_eq!(Severity::normalize(None), "");
    }

    #[test]
    fn test_severity_emoji() {
        assert_eq!(Severity::High.emoji(), "🔴");
        assert_eq!(Severity::Medium.emoji(), "🟡");
        assert_eq!(Severity::Low.emoji(), "🟢");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_excerpt_adds_ellipsis_only_when_cut() {
        assert_eq!(excerpt("short", 300), "short");
        let long = "x".repeat(301);
        let cut = excerpt(&long, 300);
        assert_eq!(cut.len(), 303);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_service_summary_defaults() {
        let output = json!({
            "data_collecting": {"details": "Email, name", "severity": "Medium"},
            "data_sharing": {"severity": "High"}
        });

        let summary = ServiceSummary::from_model_output(&output);
        assert_eq!(summary.data_collecting.details, "Email, name");
        assert_eq!(summary.data_sharing.details, "Not specified");
        assert_eq!(summary.data_retention.severity, "Unknown");
        assert_eq!(summary.overall_privacy_risk, "Unknown");
    }

    #[test]
    fn test_runtime_message_wire_shape() {
        let msg = RuntimeMessage::SummarizePolicy {
            text: "We collect cookies.".to_string(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"type": "SUMMARIZE_POLICY", "text": "We collect cookies."})
        );
    }

    #[test]
    fn test_display_summary_uses_camel_case() {
        let section = DisplaySection::new("t", "low");
        let summary = DisplaySummary {
            collection: section.clone(),
            sharing: section.clone(),
            retention: section.clone(),
            overall_risk: section,
            excerpt: String::new(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("overallRisk").is_some());
        assert!(value.get("overall_risk").is_none());
    }

    #[test]
    fn test_service_response_error_body() {
        let body = ServiceResponse::failure("Missing required field: policy_text", None);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value.get("summary").is_none());
        assert!(value.get("error").is_none());
    }
}
