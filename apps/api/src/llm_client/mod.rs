/// LLM Client — the single point of entry for all model API calls in Podium.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through this module.
///
/// The provider is not hardcoded: every request carries its own provider id,
/// API key, and optional model override, because the credentials belong to
/// the end user and arrive with each upload.
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod providers;

use providers::ProviderAdapter;

/// Retries after the first attempt. Total attempts = MAX_RETRIES + 1.
pub const MAX_RETRIES: u32 = 2;
const INITIAL_DELAY_MS: u64 = 1000;
/// Generous ceiling so a long résumé extraction is never truncated mid-object.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;
pub const TEMPERATURE: f32 = 0.7;
/// No provider defines a client-side bound, so we impose one: a hung request
/// without an HTTP error would otherwise never surface as a failure.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Typed failure constructed at the point the HTTP status is known.
/// The retry layer and the user-facing classification both switch on this
/// enum — no message-substring matching anywhere.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected (status {status})")]
    Auth { status: u16 },

    #[error("rate limited by provider")]
    RateLimited,

    #[error("provider server error (status {status})")]
    Server { status: u16 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("no AI provider configured")]
    NotConfigured,
}

impl LlmError {
    /// Auth failures and bad configuration never resolve on their own;
    /// everything else gets another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            LlmError::Auth { .. } | LlmError::UnsupportedProvider(_) | LlmError::NotConfigured
        )
    }

    /// User-facing message. Diagnostic detail stays in logs.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::Auth { .. } => {
                "Invalid API key. Check your AI provider credentials and try again.".to_string()
            }
            LlmError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            LlmError::Timeout => {
                "The AI provider took too long to respond. Please try again.".to_string()
            }
            LlmError::Server { .. } => {
                "The AI provider is having trouble right now. Please try again later.".to_string()
            }
            LlmError::UnsupportedProvider(name) => format!("Unsupported provider: {name}"),
            LlmError::NotConfigured => "Please configure your AI provider first.".to_string(),
            LlmError::Http(_) | LlmError::Api { .. } => {
                "AI request failed. Please try again.".to_string()
            }
        }
    }
}

/// Maps a transport-level reqwest failure, distinguishing timeouts so the
/// classification layer can report them separately.
pub(crate) fn map_transport(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Http(err)
    }
}

/// Classifies a non-2xx status into a typed error.
pub(crate) fn classify_status(status: u16, message: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth { status },
        429 => LlmError::RateLimited,
        500..=599 => LlmError::Server { status },
        _ => LlmError::Api { status, message },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    pub fn parse(name: &str) -> Result<Self, LlmError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "google" => Ok(Provider::Google),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    fn adapter(&self) -> &'static dyn ProviderAdapter {
        match self {
            Provider::OpenAi => &providers::openai::OpenAiAdapter,
            Provider::Anthropic => &providers::anthropic::AnthropicAdapter,
            Provider::Google => &providers::gemini::GeminiAdapter,
        }
    }
}

/// Per-user LLM configuration as it arrives with a request. Stored client-side
/// by the browser collaborator; this service never persists it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmSettings {
    pub provider: String,
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl LlmSettings {
    /// Checks the precondition: provider and API key must both be present
    /// before any network call is attempted.
    pub fn validate(&self) -> Result<Provider, LlmError> {
        if self.provider.trim().is_empty() || self.api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured);
        }
        Provider::parse(&self.provider)
    }

    pub fn to_request(&self, prompt: String) -> Result<LlmRequest, LlmError> {
        let provider = self.validate()?;
        Ok(LlmRequest {
            provider,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            prompt,
        })
    }
}

/// A provider-agnostic generation request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub provider: Provider,
    /// Opaque secret. Never logged, never persisted server-side.
    pub api_key: String,
    pub model: Option<String>,
    pub prompt: String,
}

/// The single LLM client used by all services in Podium. Dispatches to the
/// matching provider adapter inside an exponential-backoff retry loop.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Sends `req` to its provider, retrying transient failures with
    /// exponential backoff (1s, 2s). Non-retryable errors abort immediately.
    pub async fn generate(&self, req: &LlmRequest) -> Result<String, LlmError> {
        let adapter = req.provider.adapter();
        let model = req.model.as_deref().unwrap_or(adapter.default_model());
        debug!("dispatching to {} (model {model})", req.provider.as_str());

        with_retry(|_| adapter.call(&self.http, &req.api_key, &req.prompt, model)).await
    }
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Retry wrapper shared by `generate` and tested in isolation.
/// `attempt_fn` receives the zero-based attempt index.
pub(crate) async fn with_retry<F, Fut>(mut attempt_fn: F) -> Result<String, LlmError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<String, LlmError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match attempt_fn(attempt).await {
            Ok(content) => return Ok(content),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= MAX_RETRIES => return Err(e),
            Err(e) => {
                attempt += 1;
                let delay = Duration::from_millis(INITIAL_DELAY_MS << (attempt - 1));
                warn!(
                    "LLM call failed ({e}), retry {attempt}/{MAX_RETRIES} in {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_known_names() {
        assert_eq!(Provider::parse("openai").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::parse("Anthropic").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::parse("  google ").unwrap(), Provider::Google);
    }

    #[test]
    fn test_provider_parse_unknown_name() {
        let err = Provider::parse("cohere").unwrap_err();
        assert!(matches!(err, LlmError::UnsupportedProvider(ref n) if n == "cohere"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_settings_validate_requires_provider_and_key() {
        let missing_key = LlmSettings {
            provider: "openai".into(),
            api_key: "".into(),
            model: None,
        };
        assert!(matches!(
            missing_key.validate(),
            Err(LlmError::NotConfigured)
        ));

        let missing_provider = LlmSettings {
            provider: "  ".into(),
            api_key: "sk-123".into(),
            model: None,
        };
        assert!(matches!(
            missing_provider.validate(),
            Err(LlmError::NotConfigured)
        ));
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(401, String::new()),
            LlmError::Auth { status: 401 }
        ));
        assert!(matches!(
            classify_status(403, String::new()),
            LlmError::Auth { status: 403 }
        ));
        assert!(matches!(
            classify_status(429, String::new()),
            LlmError::RateLimited
        ));
        assert!(matches!(
            classify_status(503, String::new()),
            LlmError::Server { status: 503 }
        ));
        assert!(matches!(
            classify_status(418, String::new()),
            LlmError::Api { status: 418, .. }
        ));
    }

    #[test]
    fn test_auth_errors_are_not_retryable() {
        assert!(!LlmError::Auth { status: 401 }.is_retryable());
        assert!(LlmError::RateLimited.is_retryable());
        assert!(LlmError::Server { status: 500 }.is_retryable());
        assert!(LlmError::Timeout.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_aborts_immediately_on_auth_error() {
        let mut calls = 0u32;
        let result = with_retry(|_| {
            calls += 1;
            async { Err(LlmError::Auth { status: 401 }) }
        })
        .await;

        assert_eq!(calls, 1, "auth failures must not be retried");
        assert!(matches!(result, Err(LlmError::Auth { status: 401 })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_after_transient_failures() {
        let mut calls = 0u32;
        let result = with_retry(|_| {
            calls += 1;
            let n = calls;
            async move {
                if n < 3 {
                    Err(LlmError::Server { status: 503 })
                } else {
                    Ok("recovered".to_string())
                }
            }
        })
        .await;

        assert_eq!(calls, 3);
        assert_eq!(result.unwrap(), "recovered");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_surfaces_last_error() {
        let mut calls = 0u32;
        let result = with_retry(|_| {
            calls += 1;
            async { Err(LlmError::RateLimited) }
        })
        .await;

        assert_eq!(calls, MAX_RETRIES + 1);
        assert!(matches!(result, Err(LlmError::RateLimited)));
    }

    #[test]
    fn test_user_messages_cover_the_taxonomy() {
        assert!(LlmError::Auth { status: 401 }
            .user_message()
            .contains("API key"));
        assert!(LlmError::RateLimited.user_message().contains("Rate limit"));
        assert!(LlmError::Timeout.user_message().contains("too long"));
        assert!(LlmError::NotConfigured.user_message().contains("configure"));
    }
}
