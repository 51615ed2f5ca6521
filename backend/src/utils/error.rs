use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::i18n::get_locale;

/// Errors raised by the HTTP surface before a request reaches the pipeline.
///
/// Pipeline failures never show up here: the pipeline folds them into its
/// own result so the transport can answer with an `error` field instead.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Empty query")]
    EmptyQuery,
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::ValidationError(_) => 4001,
            Self::EmptyQuery => 4002,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

impl ApiError {
    /// Get localized error message based on current locale
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::ValidationError(details) => {
                t!("validation.failed", locale = &locale, details = details).to_string()
            },
            Self::EmptyQuery => t!("validation.empty_query", locale = &locale).to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let message = self.localized_message();

        let status = match code {
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ApiErrorResponse { code, message };

        (status, Json(response)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let query_blank = errors.field_errors().contains_key("q");
        if query_blank { ApiError::EmptyQuery } else { ApiError::validation_error(errors.to_string()) }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
