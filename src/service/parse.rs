//! Two-stage parsing of the model's reply.
//!
//! First a strict JSON decode of the whole reply; if that fails, the
//! outermost `{...}` block is extracted and decoded. The stage that
//! succeeded is reported so callers can log it. The decoded value must
//! then have the summary's object shape before it can be used.

use crate::models::ServiceSummary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The whole reply was valid JSON.
    Strict,
    /// JSON had to be cut out of surrounding text.
    Extracted,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("model response is not valid JSON and contains no JSON object")]
    NoJsonObject,
    #[error("extracted JSON object is invalid: {0}")]
    InvalidExtracted(#[source] serde_json::Error),
    #[error("model response is JSON but not an object")]
    NotAnObject,
    #[error("model response field {0} is not an object")]
    FieldNotAnObject(&'static str),
}

/// Dimensions that must be objects when the model includes them.
const DIMENSION_FIELDS: [&str; 3] = ["data_collecting", "data_sharing", "data_retention"];

// (?s) so the object may span lines; greedy to take the outermost braces
static RE_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Parse a model reply into JSON.
pub fn parse_model_output(content: &str) -> Result<(Value, ParseStage), ParseError> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => Ok((value, ParseStage::Strict)),
        Err(e) => {
            warn!("Failed to parse model response as JSON: {}", e);
            let block = RE_OBJECT
                .find(content)
                .ok_or(ParseError::NoJsonObject)?;
            let value = serde_json::from_str(block.as_str()).map_err(ParseError::InvalidExtracted)?;
            Ok((value, ParseStage::Extracted))
        }
    }
}

/// Shape parsed model output into a service summary.
///
/// The root must be an object, and so must any dimension that is present.
/// Absent fields fall back to the summary defaults.
pub fn summary_from_output(output: &Value) -> Result<ServiceSummary, ParseError> {
    let object = output.as_object().ok_or(ParseError::NotAnObject)?;

    for field in DIMENSION_FIELDS {
        if let Some(value) = object.get(field) {
            if !value.is_object() {
                return Err(ParseError::FieldNotAnObject(field));
            }
        }
    }

    Ok(ServiceSummary::from_model_output(output))
}
