use async_trait::async_trait;

use super::models::LLMError;

/// Opaque generation backend: one prompt in, one text out.
#[async_trait]
pub trait LLMService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError>;

    /// Model identifier, for logs and the health endpoint.
    fn model_name(&self) -> &str;
}
