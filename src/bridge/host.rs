//! Host runtime shim.
//!
//! Everything the UI needs from its surroundings (sending runtime
//! messages, reading the active page) goes through [`HostRuntime`]. `main`
//! picks one implementation at start-up and nothing else looks at which
//! host it is running on.

use super::RuntimeHandle;
use crate::models::{RuntimeMessage, SummarizeResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Messaging plus active-page access.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Deliver a message to the background worker and await its reply.
    async fn send_message(&self, message: RuntimeMessage) -> Result<SummarizeResponse>;

    /// Text of the page the user is looking at.
    async fn active_page_text(&self) -> Result<String>;
}

/// Where the "active page" comes from on the command line.
#[derive(Debug, Clone)]
pub enum PageSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

/// Host for the terminal: in-process worker, page from args/file/stdin.
pub struct LocalHost {
    runtime: RuntimeHandle,
    source: PageSource,
}

impl LocalHost {
    pub fn new(runtime: RuntimeHandle, source: PageSource) -> Self {
        Self { runtime, source }
    }
}

#[async_trait]
impl HostRuntime for LocalHost {
    async fn send_message(&self, message: RuntimeMessage) -> Result<SummarizeResponse> {
        self.runtime.send(message).await
    }

    async fn active_page_text(&self) -> Result<String> {
        match &self.source {
            PageSource::Inline(text) => Ok(text.clone()),
            PageSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read policy file: {}", path.display())),
            PageSource::Stdin => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read policy text from stdin")?;
                Ok(text)
            }
        }
    }
}
