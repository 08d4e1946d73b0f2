use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{status_error, ProviderAdapter};
use crate::llm_client::prompts::CAREER_ADVISOR_SYSTEM;
use crate::llm_client::{map_transport, LlmError, MAX_OUTPUT_TOKENS, TEMPERATURE};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter;

impl AnthropicAdapter {
    /// The style instruction travels as a prefix on the user message rather
    /// than a separate system field, matching the wire contract callers of
    /// this service already depend on.
    fn request_body(prompt: &str, model: &str) -> Value {
        json!({
            "model": model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "messages": [
                { "role": "user", "content": format!("{CAREER_ADVISOR_SYSTEM}\n\n{prompt}") },
            ],
            "temperature": TEMPERATURE,
        })
    }

    fn extract_content(response: &Value) -> String {
        response["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn default_model(&self) -> &'static str {
        "claude-sonnet-4-20250514"
    }

    async fn call(
        &self,
        http: &reqwest::Client,
        api_key: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, LlmError> {
        debug!("Anthropic request, model={model}");

        let response = http
            .post(API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(prompt, model))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: Value = response.json().await.map_err(map_transport)?;
        Ok(Self::extract_content(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_folds_system_into_user_message() {
        let body = AnthropicAdapter::request_body("Extract this resume", "claude-sonnet-4-20250514");

        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["max_tokens"], MAX_OUTPUT_TOKENS);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        let content = messages[0]["content"].as_str().unwrap();
        assert!(content.starts_with(CAREER_ADVISOR_SYSTEM));
        assert!(content.ends_with("Extract this resume"));
    }

    #[test]
    fn test_extract_content_reads_first_block() {
        let response = json!({
            "content": [{ "type": "text", "text": "structured reply" }]
        });
        assert_eq!(
            AnthropicAdapter::extract_content(&response),
            "structured reply"
        );
    }

    #[test]
    fn test_extract_content_tolerates_missing_fields() {
        assert_eq!(AnthropicAdapter::extract_content(&json!({})), "");
        assert_eq!(
            AnthropicAdapter::extract_content(&json!({ "content": [] })),
            ""
        );
    }
}
