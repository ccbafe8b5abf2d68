//! Request dispatcher.
//!
//! Turns user-supplied policy text into a [`DisplaySummary`] with a single
//! POST to the analysis service, and provides the fixed fallback summary
//! used when that fails.
//!
//! [`DisplaySummary`]: crate::models::DisplaySummary

pub mod client;
pub mod fallback;
pub mod transport;

pub use client::*;
pub use fallback::mock_summary;
pub use transport::{HttpReply, ReqwestTransport, Transport};

use thiserror::Error;

/// Failure of a single `analyze` call.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Endpoint unset or still the placeholder; no request was sent.
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Anything that went wrong talking to the analysis service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("missing expected summary field")]
    MissingSummary,
}
