//! Fetcher implementations for retrieving page text.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - Single-page HTTP fetch with HTML text extraction
//! - `CachedFetcher` - LRU cache around any other fetcher
//! - `MockFetcher` - For testing
//!
//! # Example
//!
//! ```rust,ignore
//! use evaluator::fetchers::{CachedFetcher, HttpFetcher};
//!
//! let fetcher = CachedFetcher::new(HttpFetcher::new()?, 100);
//! ```

mod cached;
mod http;
mod mock;

pub use cached::{CacheStats, CachedFetcher, DEFAULT_CACHE_CAPACITY};
pub use http::{extract_text, HttpFetcher, DEFAULT_FETCH_TIMEOUT};
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::Fetcher;
