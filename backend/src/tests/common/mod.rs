// Common test utilities and helpers

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::Config;
use crate::services::{
    AnswerPipeline, ChunkedTranslator, LLMError, LLMService, TranslationBackend, TranslationError,
};

type TranslateFn = dyn Fn(&str, &str, &str) -> Result<String, TranslationError> + Send + Sync;

/// Translation backend driven by a closure; records every call.
pub struct MockTranslator {
    respond: Box<TranslateFn>,
    stall: Option<(String, Duration)>,
    calls: Mutex<Vec<TranslationCall>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCall {
    pub text: String,
    pub source: String,
    pub target: String,
}

impl MockTranslator {
    pub fn with<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&str, &str, &str) -> Result<String, TranslationError> + Send + Sync + 'static,
    {
        Arc::new(Self { respond: Box::new(respond), stall: None, calls: Mutex::new(Vec::new()) })
    }

    /// Upper-cases every segment, but sleeps for `delay` before answering `text`.
    pub fn stalling_on(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(|text: &str, _: &str, _: &str| Ok(text.to_uppercase())),
            stall: Some((text.to_string(), delay)),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Echoes the text tagged with the language pair, e.g. `<ta:en>text`.
    pub fn tagging() -> Arc<Self> {
        Self::with(|text, source, target| Ok(format!("<{}:{}>{}", source, target, text)))
    }

    pub fn failing(reason: &'static str) -> Arc<Self> {
        Self::with(move |_, _, _| Err(TranslationError::Request(reason.to_string())))
    }

    pub fn calls(&self) -> Vec<TranslationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for MockTranslator {
    async fn translate_chunk(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push(TranslationCall {
            text: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        });
        if let Some((stalled, delay)) = &self.stall
            && stalled == text
        {
            tokio::time::sleep(*delay).await;
        }
        (self.respond)(text, source, target)
    }
}

/// Generation backend returning scripted replies, then a fallback.
pub struct MockLLM {
    scripted: Mutex<VecDeque<Result<String, LLMError>>>,
    fallback: Result<String, LLMError>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl MockLLM {
    pub fn answering(text: &str) -> Arc<Self> {
        Self::scripted(Vec::new(), Ok(text.to_string()))
    }

    pub fn failing(error: LLMError) -> Arc<Self> {
        Self::scripted(Vec::new(), Err(error))
    }

    pub fn scripted(
        replies: Vec<Result<String, LLMError>>,
        fallback: Result<String, LLMError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            scripted: Mutex::new(replies.into()),
            fallback,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            scripted: Mutex::new(VecDeque::new()),
            fallback: Ok(text.to_string()),
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMService for MockLLM {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.scripted.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.api_key = Some("test-key".to_string());
    config.logging.file = None;
    config
}

pub fn create_test_pipeline(
    translator: Arc<MockTranslator>,
    llm: Arc<MockLLM>,
    config: &Config,
) -> AnswerPipeline {
    let translator = ChunkedTranslator::new(translator, &config.translation);
    AnswerPipeline::new(translator, llm, config)
}
