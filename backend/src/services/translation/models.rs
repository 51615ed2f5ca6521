use thiserror::Error;

/// Failure of a single translation backend call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("input of {len} characters exceeds the {max} character limit")]
    Oversized { len: usize, max: usize },

    #[error("timed out after {0}s")]
    Timeout(u64),
}
