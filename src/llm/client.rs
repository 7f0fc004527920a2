//! Messages API client
//!
//! Sends the whole conversation plus the tool declarations on every call and
//! returns the assistant's reply as a single [`Message`].

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::types::{Message, MessagesRequest, MessagesResponse};

/// Value of the `anthropic-version` header sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Error type for model service calls
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Model service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Empty response from model service")]
    EmptyResponse,
}

/// Anything that can answer a Messages request.
///
/// The call is awaited to completion before the orchestrator does anything
/// else; there is no cancellation of an in-flight request.
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn create_message(&self, request: &MessagesRequest<'_>) -> Result<Message, ModelError>;
}

/// Error body: `{"type": "error", "error": {"type": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// HTTP client for the `/v1/messages` endpoint
#[derive(Clone)]
pub struct MessagesClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl MessagesClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. "https://api.anthropic.com"
    /// * `api_key` - Sent as the `x-api-key` header
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl ModelService for MessagesClient {
    async fn create_message(&self, request: &MessagesRequest<'_>) -> Result<Message, ModelError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)?;
        tracing::debug!(
            message_id = %parsed.id,
            stop_reason = ?parsed.stop_reason,
            blocks = parsed.content.len(),
            "Model response received"
        );
        Ok(parsed.into())
    }
}

/// Build an `Api` error from a non-success body, falling back to the raw text
fn api_error(status: u16, body: &str) -> ModelError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    ModelError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = MessagesClient::new("https://api.anthropic.com/", "key");
        assert_eq!(client.endpoint(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_api_error_uses_envelope_message() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        match api_error(401, body) {
            ModelError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "authentication_error: invalid x-api-key");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Model service returned 502: Bad Gateway");

        let err = api_error(500, "");
        assert_eq!(err.to_string(), "Model service returned 500: no response body");
    }
}
