use axum::{extract::Extension, Json};
use serde::Serialize;
use serde_json::{json, Value};

use evaluator::CacheStats;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fetch_cache: Option<CacheStats>,
}

/// Welcome payload listing the available endpoints
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Website Evaluation API",
        "endpoints": {
            "POST /evaluate": "Evaluate a website; body: {\"url\": \"...\"}",
            "GET /evaluate/{url}": "Evaluate a website given in the path",
            "GET /visualize": "Workflow diagram (Mermaid)",
            "GET /health": "Liveness and fetch cache statistics",
        }
    }))
}

/// Health check endpoint
///
/// Always 200 while the process serves requests; includes fetch cache
/// statistics when the evaluator fetches through a cache.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        fetch_cache: state.fetch_cache.as_ref().map(|cache| cache.stats()),
    })
}
