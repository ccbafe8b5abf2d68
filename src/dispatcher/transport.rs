//! HTTP transport used by the dispatcher.

use super::BackendError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Status and raw body of an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST and hands back whatever came back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, BackendError>;
}

/// Transport backed by `reqwest`.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport; `timeout_seconds` of `None` keeps reqwest's default.
    pub fn new(timeout_seconds: Option<u64>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(http_client))
    }

    /// Wrap an already configured client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, BackendError> {
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Transport(format!("request to {} timed out", url))
                } else if e.is_connect() {
                    BackendError::Transport(format!("cannot connect to {}", url))
                } else {
                    BackendError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(500).is_success());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let transport = ReqwestTransport::with_client(client);

        // Reserve a free port, then release it so the connection is refused
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = transport
            .post_json(&format!("http://{}/analyze", addr), &serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }
}
