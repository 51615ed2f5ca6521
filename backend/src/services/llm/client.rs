//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::models::{GenerateContentRequest, GenerateContentResponse, LLMError};
use super::service::LLMService;
use crate::config::LlmConfig;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

pub struct GeminiClient {
    http_client: Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.trim_start_matches("models/").to_string(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl LLMService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let api_key = self.api_key.as_deref().ok_or(LLMError::NoProviderConfigured)?;
        let body = GenerateContentRequest::from_prompt(prompt, self.temperature);

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout(self.timeout_secs)
                } else {
                    LLMError::ApiError(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(LLMError::RateLimited(retry_after));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Generation request failed with status {}: {}", status, error_text);
            return Err(LLMError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| LLMError::ParseError(e.to_string()))?;
        parsed.text()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
