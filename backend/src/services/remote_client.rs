//! Client for the `/ask` endpoint of a running healthbot server

use reqwest::Client;
use std::time::Duration;

use crate::models::AskResponse;
use crate::utils::error::ApiErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{0}")]
    Request(String),

    #[error("{0}")]
    Backend(String),
}

pub struct RemoteAskClient {
    http_client: Client,
    base_url: String,
}

impl RemoteAskClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap_or_default();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http_client, base_url }
    }

    /// Send a raw query; an `error` field in the response becomes `RemoteError::Backend`.
    pub async fn ask(&self, query: &str) -> Result<AskResponse, RemoteError> {
        let url = format!("{}/ask", self.base_url);
        tracing::debug!("Forwarding query to {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value =
            response.json().await.map_err(|e| RemoteError::Request(e.to_string()))?;

        Self::interpret(status.is_success(), body)
    }

    fn interpret(success: bool, body: serde_json::Value) -> Result<AskResponse, RemoteError> {
        if !success {
            let message = serde_json::from_value::<ApiErrorResponse>(body)
                .map(|e| e.message)
                .unwrap_or_else(|_| "unexpected error response".to_string());
            return Err(RemoteError::Backend(message));
        }

        let response: AskResponse =
            serde_json::from_value(body).map_err(|e| RemoteError::Request(e.to_string()))?;
        match response.error {
            Some(error) => Err(RemoteError::Backend(error)),
            None => Ok(response),
        }
    }
}
