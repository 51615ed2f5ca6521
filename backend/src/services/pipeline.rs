//! Answer pipeline
//!
//! classify → translate in → build prompt → generate → translate out → label.
//!
//! Translation never fails here (failed segments become in-band markers), so
//! the only terminal failure of a request is the generation call.

use rust_i18n::t;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::language::{Language, classify};
use crate::services::llm::{LLMError, LLMService, PromptBuilder, ResponseStyle};
use crate::services::translation::ChunkedTranslator;

/// A successfully answered query.
#[derive(Debug, Clone)]
pub struct Answer {
    pub language: Language,
    pub style: ResponseStyle,
    /// Final answer text in the query's language, without label.
    pub text: String,
}

/// A query whose generation step failed.
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub language: Language,
    pub error: LLMError,
}

impl Answer {
    pub fn formatted(&self) -> String {
        format_answer(self.language, &self.text)
    }
}

impl PipelineFailure {
    pub fn formatted(&self) -> String {
        t!("answer.error", locale = self.language.locale(), message = self.error.to_string())
            .to_string()
    }
}

/// Prefix `text` with the label of `language`.
pub fn format_answer(language: Language, text: &str) -> String {
    format!("{} {}", t!("answer.label", locale = language.locale()), text)
}

pub struct AnswerPipeline {
    translator: ChunkedTranslator,
    llm: Arc<dyn LLMService>,
    prompt_builder: PromptBuilder,
    generation_timeout: Duration,
}

impl AnswerPipeline {
    pub fn new(translator: ChunkedTranslator, llm: Arc<dyn LLMService>, config: &Config) -> Self {
        Self {
            translator,
            llm,
            prompt_builder: PromptBuilder::new(&config.prompt.cues),
            generation_timeout: Duration::from_secs(config.llm.timeout_secs),
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Run the pipeline, keeping success and failure apart.
    pub async fn run(&self, raw_query: &str) -> Result<Answer, PipelineFailure> {
        let language = classify(raw_query);
        tracing::debug!("Query classified as {}", language);

        let query_en = match language {
            Language::Tamil => {
                self.translator.translate(raw_query, Language::Tamil, Language::English).await
            },
            Language::English => raw_query.to_string(),
        };

        let prompt = self.prompt_builder.build(&query_en);
        tracing::debug!("Using {:?} prompt ({} chars)", prompt.style, prompt.text.len());

        let answer_en = self
            .generate(&prompt.text)
            .await
            .map_err(|error| PipelineFailure { language, error })?;

        let text = match language {
            Language::Tamil => {
                self.translator.translate(&answer_en, Language::English, Language::Tamil).await
            },
            Language::English => answer_en,
        };

        Ok(Answer { language, style: prompt.style, text })
    }

    /// Answer `raw_query` as a single labeled string; failures become the
    /// localized error string instead of propagating.
    pub async fn answer(&self, raw_query: &str) -> String {
        match self.run(raw_query).await {
            Ok(answer) => answer.formatted(),
            Err(failure) => failure.formatted(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let result = match tokio::time::timeout(self.generation_timeout, self.llm.generate(prompt))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(LLMError::Timeout(self.generation_timeout.as_secs())),
        };

        match result {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                tracing::error!(
                    model = self.llm.model_name(),
                    retryable = e.is_retryable(),
                    "Generation failed: {}",
                    e
                );
                Err(e)
            },
        }
    }
}
