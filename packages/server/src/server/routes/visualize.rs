use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

/// Workflow stage graph as Mermaid source
pub async fn visualize_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        evaluator::mermaid_diagram(),
    )
}
