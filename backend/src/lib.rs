//! Bilingual (English/Tamil) healthcare question answering.
//!
//! A question is classified by script, translated to English when needed,
//! answered by the generation backend and translated back before display.

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod frontend;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::{AnswerPipeline, ChunkedTranslator, GeminiClient, GoogleTranslateClient};

pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::ask::ask, handlers::health::health),
    components(schemas(
        models::AskResponse,
        models::HealthResponse,
        services::Language,
        utils::error::ApiErrorResponse
    )),
    tags((name = "Assistant", description = "Bilingual healthcare question answering"))
)]
pub struct ApiDoc;

/// Wire the production backends into one shared pipeline.
pub fn build_pipeline(config: &Config) -> AnswerPipeline {
    let translator = ChunkedTranslator::new(
        Arc::new(GoogleTranslateClient::new(&config.translation)),
        &config.translation,
    );
    let llm = Arc::new(GeminiClient::new(&config.llm));
    AnswerPipeline::new(translator, llm, config)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", get(handlers::ask::ask))
        .route("/health", get(handlers::health::health))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(middleware::locale_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
