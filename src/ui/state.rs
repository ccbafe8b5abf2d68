//! Popup state machine.
//!
//! `Idle -> Pending -> Rendered | RenderedWithFallback`, and any rendered
//! state accepts a new submission. The trigger is refused while a request
//! is pending.

use crate::models::{RuntimeMessage, SummarizeResponse};
use thiserror::Error;

/// Why a submission was refused before reaching the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please paste some privacy policy text first.")]
    EmptyInput,
    #[error("An analysis is already in progress.")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    Idle,
    Pending,
    Rendered(SummarizeResponse),
    RenderedWithFallback(SummarizeResponse),
}

#[derive(Debug, Clone)]
pub struct Popup {
    state: PopupState,
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

impl Popup {
    pub fn new() -> Self {
        Self {
            state: PopupState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == PopupState::Pending
    }

    /// Accept the analyze action, returning the message to send.
    pub fn submit(&mut self, text: &str) -> Result<RuntimeMessage, ValidationError> {
        if self.is_pending() {
            return Err(ValidationError::Busy);
        }
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        self.state = PopupState::Pending;
        Ok(RuntimeMessage::SummarizePolicy {
            text: text.to_string(),
        })
    }

    /// Settle the pending request with the worker's reply.
    pub fn complete(&mut self, response: SummarizeResponse) -> &PopupState {
        self.state = if response.ok {
            PopupState::Rendered(response)
        } else {
            PopupState::RenderedWithFallback(response)
        };
        &self.state
    }

    /// The response currently on screen, if any.
    pub fn rendered(&self) -> Option<&SummarizeResponse> {
        match &self.state {
            PopupState::Rendered(r) | PopupState::RenderedWithFallback(r) => Some(r),
            PopupState::Idle | PopupState::Pending => None,
        }
    }

    /// Status line shown under the summary.
    pub fn status_line(&self) -> &'static str {
        match self.state {
            PopupState::Idle => "",
            PopupState::Pending => "Analyzing policy...",
            PopupState::Rendered(_) | PopupState::RenderedWithFallback(_) => "Summary generated.",
        }
    }
}
