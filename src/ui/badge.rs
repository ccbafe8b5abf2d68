//! Severity badges.

use crate::models::Severity;

/// How a severity string is painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    /// One of the three fixed visual classes.
    Classed(Severity),
    /// Unrecognized value, shown verbatim without a class.
    Plain(String),
    /// Nothing to show.
    Empty,
}

impl Badge {
    pub fn from_severity(raw: &str) -> Self {
        if let Some(severity) = Severity::parse(raw) {
            Badge::Classed(severity)
        } else if raw.trim().is_empty() {
            Badge::Empty
        } else {
            Badge::Plain(raw.to_string())
        }
    }

    /// Terminal rendering.
    pub fn render(&self) -> String {
        match self {
            Badge::Classed(s) => format!("{} {}", s.emoji(), s.to_string().to_uppercase()),
            Badge::Plain(raw) => raw.clone(),
            Badge::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variants_share_a_class() {
        let badges: Vec<Badge> = ["Low", "low", "LOW"]
            .iter()
            .map(|s| Badge::from_severity(s))
            .collect();
        assert!(badges.iter().all(|b| *b == Badge::Classed(Severity::Low)));
        assert!(badges.iter().all(|b| b.render() == "🟢 LOW"));
    }

    #[test]
    fn test_unrecognized_renders_plain() {
        let badge = Badge::from_severity("urgent");
        assert_eq!(badge, Badge::Plain("urgent".to_string()));
        assert_eq!(badge.render(), "urgent");
    }

    #[test]
    fn test_empty_renders_nothing() {
        let badge = Badge::from_severity("");
        assert_eq!(badge, Badge::Empty);
        assert_eq!(badge.render(), "");
    }

    #[test]
    fn test_classed_render() {
        assert_eq!(Badge::from_severity("high").render(), "🔴 HIGH");
        assert_eq!(
            Badge::from_severity("Medium"),
            Badge::Classed(Severity::Medium)
        );
    }
}
