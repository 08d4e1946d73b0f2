//! Provider adapters — per-provider request/response translation.
//!
//! Each adapter owns exactly three things: the auth header, the payload
//! shape, and the path to the reply text inside the response envelope.
//! Everything else (retry, timeouts, error classification, prompts) lives
//! in the parent module.

use async_trait::async_trait;
use serde_json::Value;

use super::{classify_status, LlmError};

pub mod anthropic;
pub mod gemini;
pub mod openai;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Model used when the request does not name one.
    fn default_model(&self) -> &'static str;

    /// Sends one prompt and returns the reply text. Non-2xx responses become
    /// typed errors carrying the HTTP status and, when parseable, the
    /// provider's own error message.
    async fn call(
        &self,
        http: &reqwest::Client,
        api_key: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, LlmError>;
}

/// Turns a non-2xx response into a typed error. All three providers wrap
/// their failure detail as `{"error": {"message": ...}}`, so one extractor
/// covers them.
pub(crate) async fn status_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = provider_error_message(&body).unwrap_or(body);
    tracing::warn!("provider returned status {status}: {message}");
    classify_status(status, message)
}

fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"].as_str().map(String::from)
}
