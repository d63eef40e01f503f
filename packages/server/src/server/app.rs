//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use evaluator::ai::OpenAI;
use evaluator::{CacheStats, CachedFetcher, Evaluator, Fetcher, HttpFetcher};

use crate::config::Config;
use crate::server::routes::{
    evaluate_get_handler, evaluate_post_handler, health_handler, root_handler, visualize_handler,
};

/// Read access to fetch-cache statistics for the health endpoint.
pub trait FetchCache: Send + Sync {
    fn stats(&self) -> CacheStats;
}

impl<F: Fetcher> FetchCache for CachedFetcher<F> {
    fn stats(&self) -> CacheStats {
        CachedFetcher::stats(self)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
    pub fetch_cache: Option<Arc<dyn FetchCache>>,
}

impl AppState {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            fetch_cache: None,
        }
    }

    /// Report statistics from the cache the evaluator fetches through.
    pub fn with_fetch_cache(mut self, cache: Arc<dyn FetchCache>) -> Self {
        self.fetch_cache = Some(cache);
        self
    }

    /// Wire the production collaborators: an OpenAI-compatible model and a
    /// cached HTTP fetcher shared by every request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ai = OpenAI::new(config.llm_api_key.clone())
            .with_base_url(config.llm_base_url.clone())
            .with_model(config.llm_model.clone())
            .with_temperature(config.llm_temperature)
            .with_timeout(config.llm_timeout);

        let http = HttpFetcher::with_timeout(config.fetch_timeout)
            .context("Failed to create HTTP fetcher")?;
        let cache = Arc::new(CachedFetcher::new(http, config.fetch_cache_capacity));

        let evaluator = Evaluator::new(ai, Arc::clone(&cache))
            .with_config(config.evaluator_config());

        Ok(Self::new(evaluator).with_fetch_cache(cache))
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/evaluate", post(evaluate_post_handler))
        .route("/evaluate/*url", get(evaluate_get_handler))
        .route("/visualize", get(visualize_handler))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
