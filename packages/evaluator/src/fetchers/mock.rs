//! Mock fetcher for testing.
//!
//! Provides a configurable mock implementation of the Fetcher trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;

/// Mock fetcher for testing.
///
/// Returns canned pages or failures by URL. Unknown URLs fail with a
/// transport error, mirroring an unreachable host.
///
/// # Example
///
/// ```rust
/// use evaluator::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new().with_page("https://example.com", "Hello, world!");
/// assert_eq!(mock.fetch_call_count(), 0);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    /// Canned responses indexed by URL
    responses: Arc<RwLock<HashMap<String, FetchResult<String>>>>,
    /// Track calls for verification
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page that will be returned for a URL.
    pub fn add_page(&self, url: impl Into<String>, text: impl Into<String>) {
        let mut responses = self.responses.write().unwrap();
        responses.insert(url.into(), Ok(text.into()));
    }

    /// Add a failure that will be returned for a URL.
    pub fn add_failure(&self, url: impl Into<String>, error: FetchError) {
        let mut responses = self.responses.write().unwrap();
        responses.insert(url.into(), Err(error));
    }

    /// Add a page (builder pattern).
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_page(url, text);
        self
    }

    /// Add a failure (builder pattern).
    pub fn with_failure(self, url: impl Into<String>, error: FetchError) -> Self {
        self.add_failure(url, error);
        self
    }

    /// Get the number of times fetch was called.
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.read().unwrap().len()
    }

    /// Get the URLs that were requested.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.fetch_calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.fetch_calls.write().unwrap().push(url.to_string());

        let responses = self.responses.read().unwrap();
        responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Transport {
                message: format!("no route to host for {}", url),
            })
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
