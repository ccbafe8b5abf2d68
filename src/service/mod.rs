//! Policy analysis service.
//!
//! Exposes `POST /analyze`: builds the analysis prompt, asks the model,
//! repairs its JSON if needed and returns the fixed summary shape.

pub mod completion;
pub mod handler;
pub mod parse;
pub mod prompt;

pub use completion::{CompletionProvider, OpenAiProvider};
pub use handler::{create_router, AppState};

use anyhow::{Context, Result};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Failure while producing an analysis.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Provider(String),
    #[error(transparent)]
    Parse(#[from] parse::ParseError),
}

/// Bind and serve until the process is stopped.
pub async fn run(bind: &str, provider: Arc<dyn CompletionProvider>) -> Result<()> {
    let app = create_router(AppState { provider });

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    info!("Analysis service listening on http://{}/analyze", addr);
    axum::serve(listener, app)
        .await
        .context("Analysis service stopped unexpectedly")?;

    Ok(())
}
