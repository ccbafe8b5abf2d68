//! Chat-completion provider.
//!
//! The language model is reached through an OpenAI-compatible
//! `/chat/completions` endpoint. The provider trait is the seam tests use
//! to stand in for the real API.

use super::ServiceError;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Message in the chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Something that turns chat messages into the model's reply text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model name for logging.
    fn model(&self) -> &str;

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI chat-completions client.
pub struct OpenAiProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    timeout_seconds: u64,
}

impl OpenAiProvider {
    pub fn new(config: &ServiceConfig, api_key: String) -> Result<Self, ServiceError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ServiceError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.openai_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        debug!(
            "Messages sent to provider: {}",
            serde_json::to_string_pretty(&request.messages).unwrap_or_default()
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Provider(format!(
                        "Request timed out after {}s",
                        self.timeout_seconds
                    ))
                } else if e.is_connect() {
                    ServiceError::Provider(format!("Cannot connect to {}", self.base_url))
                } else {
                    ServiceError::Provider(format!("Failed to send request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Provider(format!(
                "Provider API error {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Provider(format!("Failed to parse provider response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ServiceError::Provider("Provider returned no message content".to_string()))
    }
}
