//! Fixed summary shown when the analysis service cannot be used.
//!
//! The values never depend on the failure or on the input, apart from the
//! echoed excerpt.

use crate::models::{excerpt, DisplaySection, DisplaySummary};

pub const MOCK_COLLECTION: &str =
    "Collects contact details, device identifiers and usage data such as pages visited.";
pub const MOCK_SHARING: &str =
    "Shares personal data with advertising partners, analytics providers and affiliates.";
pub const MOCK_RETENTION: &str =
    "Keeps data for as long as the account is active; no fixed retention period is stated.";
pub const MOCK_OVERALL: &str = "Overall privacy risk: High.";

/// The deterministic fallback summary.
pub fn mock_summary(raw_text: &str, excerpt_chars: usize) -> DisplaySummary {
    DisplaySummary {
        collection: DisplaySection::new(MOCK_COLLECTION, "low"),
        sharing: DisplaySection::new(MOCK_SHARING, "high"),
        retention: DisplaySection::new(MOCK_RETENTION, "medium"),
        overall_risk: DisplaySection::new(MOCK_OVERALL, "high"),
        excerpt: excerpt(raw_text, excerpt_chars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_severities_are_fixed() {
        let summary = mock_summary("anything", 300);
        assert_eq!(summary.collection.severity, "low");
        assert_eq!(summary.sharing.severity, "high");
        assert_eq!(summary.retention.severity, "medium");
        assert_eq!(summary.overall_risk.severity, "high");
    }

    #[test]
    fn test_mock_ignores_input_except_excerpt() {
        let a = mock_summary("first policy", 300);
        let b = mock_summary("second policy", 300);
        assert_eq!(a.collection, b.collection);
        assert_eq!(a.sharing, b.sharing);
        assert_eq!(a.retention, b.retention);
        assert_eq!(a.overall_risk, b.overall_risk);
        assert_ne!(a.excerpt, b.excerpt);
    }

    #[test]
    fn test_mock_excerpt_is_truncated() {
        let long = "p".repeat(500);
        let summary = mock_summary(&long, 300);
        assert_eq!(summary.excerpt, format!("{}...", "p".repeat(300)));
    }
}
