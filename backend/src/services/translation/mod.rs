//! Chunked translation
//!
//! Long text is split into bounded segments, each segment is translated on
//! its own, in order, and the results are joined with a single space. A
//! failing segment is replaced by a visible marker; the call as a whole
//! never fails.

mod chunking;
mod client;
mod models;

pub use chunking::split_chunks;
pub use client::GoogleTranslateClient;
pub use models::TranslationError;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::services::language::Language;

/// Opaque translation backend: one bounded-size call per segment.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate_chunk(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// Marker substituted for a segment whose translation failed.
pub fn failure_marker(err: &TranslationError) -> String {
    format!("[Translation error: {}]", err)
}

pub struct ChunkedTranslator {
    backend: Arc<dyn TranslationBackend>,
    chunk_size: usize,
    timeout: Duration,
}

impl ChunkedTranslator {
    pub fn new(backend: Arc<dyn TranslationBackend>, config: &TranslationConfig) -> Self {
        Self {
            backend,
            chunk_size: config.chunk_size,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Translate every segment of `text`, keeping per-segment outcomes.
    ///
    /// Segments are sent one at a time so results stay in input order.
    pub async fn translate_segments(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Vec<Result<String, TranslationError>> {
        let chunks = split_chunks(text, self.chunk_size);
        let mut results = Vec::with_capacity(chunks.len());

        for (idx, chunk) in chunks.iter().enumerate() {
            let call = self.backend.translate_chunk(chunk, source.code(), target.code());
            let outcome = match tokio::time::timeout(self.timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(TranslationError::Timeout(self.timeout.as_secs())),
            };

            if let Err(e) = &outcome {
                tracing::warn!(
                    "Translation segment {}/{} ({} -> {}) failed: {}",
                    idx + 1,
                    chunks.len(),
                    source.code(),
                    target.code(),
                    e
                );
            }
            results.push(outcome);
        }

        results
    }

    /// Translate `text` from `source` to `target`.
    ///
    /// Returns `text` unchanged when both languages are the same.
    pub async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        if source == target {
            tracing::debug!("Skipping translation, source and target are both {}", source);
            return text.to_string();
        }

        self.translate_segments(text, source, target)
            .await
            .into_iter()
            .map(|segment| match segment {
                Ok(translated) => translated,
                Err(e) => failure_marker(&e),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
