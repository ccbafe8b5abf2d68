//! Message bridge between the UI and the dispatcher.
//!
//! The background worker owns the [`RequestDispatcher`] and answers
//! `SUMMARIZE_POLICY` messages. Each message carries its own reply channel,
//! so the sender simply awaits a future; the worker may answer long after
//! the send returned.

pub mod host;

pub use host::{HostRuntime, LocalHost, PageSource};

use crate::dispatcher::{mock_summary, RequestDispatcher};
use crate::models::{RuntimeMessage, SummarizeResponse};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the worker inbox.
const INBOX_CAPACITY: usize = 16;

/// A message plus the channel its reply goes back on.
struct Envelope {
    message: RuntimeMessage,
    reply: oneshot::Sender<SummarizeResponse>,
}

/// Sending half of the worker's inbox.
#[derive(Clone)]
pub struct RuntimeHandle {
    inbox: mpsc::Sender<Envelope>,
}

impl RuntimeHandle {
    /// Send a message and wait for the worker's reply.
    pub async fn send(&self, message: RuntimeMessage) -> Result<SummarizeResponse> {
        let (reply, response) = oneshot::channel();

        self.inbox
            .send(Envelope { message, reply })
            .await
            .map_err(|_| anyhow!("background worker is not running"))?;

        response
            .await
            .map_err(|_| anyhow!("background worker dropped the request"))
    }
}

/// Start the background worker on the current tokio runtime.
///
/// The worker stops once every [`RuntimeHandle`] is dropped.
pub fn spawn_worker(dispatcher: Arc<RequestDispatcher>) -> (RuntimeHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Envelope>(INBOX_CAPACITY);

    let worker = tokio::spawn(async move {
        debug!("Background worker started");
        while let Some(envelope) = rx.recv().await {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                let response = handle_message(&dispatcher, envelope.message).await;
                if envelope.reply.send(response).is_err() {
                    debug!("Requester went away before the reply was ready");
                }
            });
        }
        debug!("Background worker stopped");
    });

    (RuntimeHandle { inbox: tx }, worker)
}

/// Answer one message, substituting the fallback summary on any failure.
pub async fn handle_message(
    dispatcher: &RequestDispatcher,
    message: RuntimeMessage,
) -> SummarizeResponse {
    match message {
        RuntimeMessage::SummarizePolicy { text } => match dispatcher.analyze(&text).await {
            Ok(summary) => {
                info!("Summary generated");
                SummarizeResponse {
                    ok: true,
                    summary,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Analysis failed, using fallback summary: {}", e);
                SummarizeResponse {
                    ok: false,
                    summary: mock_summary(&text, dispatcher.excerpt_chars()),
                    error: Some(e.to_string()),
                }
            }
        },
    }
}
