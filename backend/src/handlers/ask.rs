//! Question answering endpoint

use axum::extract::{Json, Query, State};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::AppState;
use crate::models::{AskQuery, AskResponse};
use crate::utils::ApiResult;

/// GET /ask?q=...
#[utoipa::path(
    get,
    path = "/ask",
    params(AskQuery),
    responses(
        (status = 200, description = "Answer, or generation error detail", body = AskResponse),
        (status = 400, description = "Missing or blank question", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Assistant"
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AskQuery>,
) -> ApiResult<Json<AskResponse>> {
    query.validate()?;

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("ask", %request_id);

    let response = async move {
        let t0 = std::time::Instant::now();
        tracing::info!("Received question ({} chars)", query.q.chars().count());

        match state.pipeline.run(&query.q).await {
            Ok(answer) => {
                tracing::info!(
                    "Answered in {}ms (language={}, style={:?})",
                    t0.elapsed().as_millis(),
                    answer.language,
                    answer.style
                );
                AskResponse::from(answer)
            },
            Err(failure) => {
                tracing::warn!(
                    "Request failed after {}ms: {}",
                    t0.elapsed().as_millis(),
                    failure.error
                );
                AskResponse::from(failure)
            },
        }
    }
    .instrument(span)
    .await;

    Ok(Json(response))
}
