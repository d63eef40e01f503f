use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use evaluator::EvaluationError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("url must not be empty")]
    EmptyUrl,

    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyUrl => StatusCode::BAD_REQUEST,
            Self::Evaluation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
