use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::services::Language;
use crate::services::pipeline::{Answer, PipelineFailure};

/// Query string of `GET /ask`
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AskQuery {
    /// Raw question in English or Tamil
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskResponse {
    /// Final answer in the question's language, without label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Detected language of the question
    pub language: Language,
    /// Failure detail when no answer could be generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self { answer: Some(answer.text), language: answer.language, error: None }
    }
}

impl From<PipelineFailure> for AskResponse {
    fn from(failure: PipelineFailure) -> Self {
        Self { answer: None, language: failure.language, error: Some(failure.error.to_string()) }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
