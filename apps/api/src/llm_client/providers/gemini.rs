use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{status_error, ProviderAdapter};
use crate::llm_client::prompts::CAREER_ADVISOR_SYSTEM;
use crate::llm_client::{map_transport, LlmError, MAX_OUTPUT_TOKENS, TEMPERATURE};

pub struct GeminiAdapter;

impl GeminiAdapter {
    /// Gemini authenticates via a query parameter, not a header.
    fn url(api_key: &str, model: &str) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent?key={api_key}"
        )
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "parts": [{ "text": format!("{CAREER_ADVISOR_SYSTEM}\n\n{prompt}") }] },
            ],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        })
    }

    fn extract_content(response: &Value) -> String {
        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn default_model(&self) -> &'static str {
        "gemini-pro"
    }

    async fn call(
        &self,
        http: &reqwest::Client,
        api_key: &str,
        prompt: &str,
        model: &str,
    ) -> Result<String, LlmError> {
        debug!("Gemini request, model={model}");

        let response = http
            .post(Self::url(api_key, model))
            .header("Content-Type", "application/json")
            .json(&Self::request_body(prompt))
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
