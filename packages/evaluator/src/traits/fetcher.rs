//! Fetcher trait for pluggable page retrieval.
//!
//! A fetcher turns a URL into extracted page text. Fetching is idempotent
//! and therefore cacheable by URL (see [`crate::fetchers::CachedFetcher`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! use evaluator::{CachedFetcher, Fetcher, HttpFetcher};
//!
//! let fetcher = CachedFetcher::new(HttpFetcher::new()?, 100);
//! match fetcher.fetch("https://example.com").await {
//!     Ok(text) => println!("{} chars", text.len()),
//!     Err(e) => println!("{}", e),
//! }
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchResult;

/// Fetcher trait for retrieving page text.
///
/// Implementations must bound their own network wait and report a
/// [`FetchError`](crate::error::FetchError) instead of blocking forever.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL and return its extracted text.
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
