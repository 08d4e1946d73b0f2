use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{status_error, ProviderAdapter};
use crate::llm_client::prompts::CAREER_ADVISOR_SYSTEM;
use crate::llm_client::{map_transport, LlmError, MAX_OUTPUT_TOKENS, TEMPERATURE};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiAdapter;

impl OpenAiAdapter {
    fn request_body(prompt: &str, model: &str) -> Value {
        json!({
            "model": model,
            "messages": [
                { "role": "system", "content": CAREER_ADVISOR_SYSTEM },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    /// Missing fields yield an empty string, not an error — the caller
    /// decides what an empty reply means.
    fn extract_content(response: &Value) -> String {
        response["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn default_model(&self) -> &'static str {
        "gpt-4.1-2025-04-14"
    }

    async fn call(
        &self,
        http: &reqwest::Client,
        api_key: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, LlmError> {
        debug!("OpenAI request, model={model}");

        let response = http
            .post(API_URL)
            .header("Authorization", format!("Bearer {api_key}"))
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
    fn test_request_body_shape() {
        let body = OpenAiAdapter::request_body("Extract this resume", "gpt-4o");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], MAX_OUTPUT_TOKENS);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], CAREER_ADVISOR_SYSTEM);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Extract this resume");
    }

    #[test]
    fn test_extract_content_reads_first_choice() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
        });
        assert_eq!(OpenAiAdapter::extract_content(&response), "hello");
    }

    #[test]
    fn test_extract_content_tolerates_missing_fields() {
        assert_eq!(OpenAiAdapter::extract_content(&json!({})), "");
        assert_eq!(
            OpenAiAdapter::extract_content(&json!({ "choices": [] })),
            ""
        );
    }
}
