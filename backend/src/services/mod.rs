pub mod language;
pub mod llm;
pub mod pipeline;
pub mod remote_client;
pub mod transcript;
pub mod translation;

pub use language::{Language, classify};
pub use llm::{GeminiClient, LLMError, LLMService};
pub use pipeline::{Answer, AnswerPipeline, PipelineFailure, format_answer};
pub use remote_client::{RemoteAskClient, RemoteError};
pub use transcript::{Transcript, TranscriptEntry};
pub use translation::{ChunkedTranslator, GoogleTranslateClient, TranslationBackend, TranslationError};
