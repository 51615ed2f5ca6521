//! Google Translate HTTP backend
//!
//! Uses the public `translate_a/single` endpoint. The response is a nested
//! JSON array whose first element lists `[translated, original, ...]`
//! sentence pairs.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::TranslationBackend;
use super::models::TranslationError;
use crate::config::{TRANSLATION_BACKEND_MAX_CHARS, TranslationConfig};

pub struct GoogleTranslateClient {
    http_client: Client,
    api_base: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig) -> Self {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { http_client, api_base: config.api_base.trim_end_matches('/').to_string() }
    }

    fn parse_response(body: &Value) -> Result<String, TranslationError> {
        let sentences = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslationError::Parse("missing sentence list".to_string()))?;

        let translated: String = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        Ok(translated)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    async fn translate_chunk(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let len = text.chars().count();
        if len > TRANSLATION_BACKEND_MAX_CHARS {
            return Err(TranslationError::Oversized { len, max: TRANSLATION_BACKEND_MAX_CHARS });
        }

        let url = format!("{}/translate_a/single", self.api_base);
        tracing::debug!("Translating {} chars {} -> {}", len, source, target);

        let response = self
            .http_client
            .get(&url)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t"), ("q", text)])
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        Self::parse_response(&body)
    }
}
