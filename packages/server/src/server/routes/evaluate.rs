use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;
use tracing::info;

use evaluator::EvaluationResult;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub url: String,
}

/// Evaluate the URL given in the JSON body
pub async fn evaluate_post_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    evaluate(&state, &request.url).await
}

/// Evaluate the URL given as the rest of the path
pub async fn evaluate_get_handler(
    Extension(state): Extension<AppState>,
    Path(url): Path<String>,
) -> Result<Json<EvaluationResult>, ApiError> {
    evaluate(&state, &url).await
}

async fn evaluate(state: &AppState, url: &str) -> Result<Json<EvaluationResult>, ApiError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::EmptyUrl);
    }

    info!(url = %url, "Evaluation requested");
    let result = state.evaluator.evaluate(url).await?;
    Ok(Json(result))
}
