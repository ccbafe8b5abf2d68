//! `POST /analyze` handler and router.

use super::completion::CompletionProvider;
use super::parse::{parse_model_output, summary_from_output, ParseStage};
use super::prompt::build_analysis_messages;
use super::ServiceError;
use crate::models::{ServiceResponse, ServiceSummary};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

/// Create the router with CORS for browser callers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-amz-date"),
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
        ]);

    Router::new()
        .route("/analyze", post(analyze_handler))
        .layer(cors)
        .with_state(state)
}

/// Body is read as raw bytes so that a missing, malformed or non-UTF-8 body
/// is a 400 with the service's own error shape rather than axum's rejection.
async fn analyze_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let policy_text = extract_policy_text(&body);

    if policy_text.is_empty() {
        warn!("No policy text provided in request");
        let response = (
            StatusCode::BAD_REQUEST,
            Json(ServiceResponse::failure(
                "Missing required field: policy_text",
                None,
            )),
        );
        info!("Returning response with status code: 400");
        return response;
    }

    info!(
        "Analyzing policy text (length: {} characters)",
        policy_text.chars().count()
    );

    let response = match analyze_policy(state.provider.as_ref(), &policy_text).await {
        Ok(summary) => (StatusCode::OK, Json(ServiceResponse::success(summary))),
        Err(e) => {
            error!("Error analyzing policy: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServiceResponse::failure(
                    "Error analyzing privacy policy",
                    Some(e.to_string()),
                )),
            )
        }
    };

    info!("Returning response with status code: {}", response.0.as_u16());
    response
}

/// Trimmed `policy_text` from a request body; empty when absent or unparsable.
pub fn extract_policy_text(body: &[u8]) -> String {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            if !body.iter().all(u8::is_ascii_whitespace) {
                error!("Failed to parse request body: {}", e);
            }
            Value::Null
        }
    };

    parsed
        .get("policy_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Ask the model about one policy and shape its answer.
pub async fn analyze_policy(
    provider: &dyn CompletionProvider,
    policy_text: &str,
) -> Result<ServiceSummary, ServiceError> {
    let messages = build_analysis_messages(policy_text);

    info!("Starting completion call with model {}", provider.model());
    let content = provider.complete(messages).await?;
    info!("Completion call successful");
    debug!("Model response content: {}", content);

    let (output, stage) = parse_model_output(&content)?;
    if stage == ParseStage::Extracted {
        warn!("Model response needed JSON extraction");
    }

    Ok(summary_from_output(&output)?)
}
