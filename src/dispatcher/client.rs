//! The `analyze` call: preprocess, POST, validate, remap.

use super::{BackendError, DispatchError, Transport};
use crate::config::{is_placeholder_endpoint, ClientConfig};
use crate::models::{
    excerpt, truncate_chars, AnalysisRequest, DisplaySection, DisplaySummary, Severity,
    EMPTY_TEXT_PLACEHOLDER, NOT_SPECIFIED, UNKNOWN,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Dispatches policy text to the analysis service.
pub struct RequestDispatcher {
    endpoint: String,
    max_input_chars: usize,
    excerpt_chars: usize,
    transport: Arc<dyn Transport>,
}

impl RequestDispatcher {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: config.endpoint.trim().to_string(),
            max_input_chars: config.max_input_chars,
            excerpt_chars: config.excerpt_chars,
            transport,
        }
    }

    /// Maximum excerpt length echoed in summaries.
    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars
    }

    /// Summarize `raw_text` through the analysis service.
    ///
    /// Issues at most one request. Fails without any request when the
    /// endpoint is unset or still the placeholder.
    pub async fn analyze(&self, raw_text: &str) -> Result<DisplaySummary, DispatchError> {
        let policy_text = prepare_policy_text(raw_text, self.max_input_chars);

        if is_placeholder_endpoint(&self.endpoint) {
            return Err(DispatchError::Configuration(format!(
                "analysis endpoint is not configured (got {:?}); set client.endpoint or POLICYSCOPE_ENDPOINT",
                self.endpoint
            )));
        }

        info!(
            "Sending {} characters to the analysis service",
            policy_text.chars().count()
        );

        let request = serde_json::to_value(AnalysisRequest { policy_text })
            .map_err(|e| BackendError::InvalidJson(e.to_string()))?;
        let reply = self.transport.post_json(&self.endpoint, &request).await?;

        if !reply.is_success() {
            return Err(BackendError::Status {
                status: reply.status,
                body: reply.body,
            }
            .into());
        }

        let body: Value = serde_json::from_str(&reply.body)
            .map_err(|e| BackendError::InvalidJson(e.to_string()))?;

        let summary = match (body.get("status").and_then(Value::as_str), body.get("summary")) {
            (Some("success"), Some(summary)) if !summary.is_null() => summary,
            _ => return Err(BackendError::MissingSummary.into()),
        };

        debug!("Service summary: {}", summary);

        Ok(remap_summary(summary, excerpt(raw_text, self.excerpt_chars)))
    }
}

/// Trim, substitute the placeholder for empty input, and cap the length.
pub fn prepare_policy_text(raw_text: &str, max_chars: usize) -> String {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return EMPTY_TEXT_PLACEHOLDER.to_string();
    }
    truncate_chars(trimmed, max_chars).to_string()
}

/// Map the service vocabulary onto the display vocabulary.
fn remap_summary(summary: &Value, excerpt: String) -> DisplaySummary {
    let section = |key: &str| {
        let record = summary.get(key);
        DisplaySection::new(
            record
                .and_then(|r| r.get("details"))
                .and_then(Value::as_str)
                .unwrap_or(NOT_SPECIFIED),
            Severity::normalize(record.and_then(|r| r.get("severity"))),
        )
    };

    let overall = summary
        .get("overall_privacy_risk")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN);

    DisplaySummary {
        collection: section("data_collecting"),
        sharing: section("data_sharing"),
        retention: section("data_retention"),
        overall_risk: DisplaySection::new(
            format!("Overall privacy risk: {}.", overall),
            Severity::normalize(Some(&Value::String(overall.to_string()))),
        ),
        excerpt,
    }
}
