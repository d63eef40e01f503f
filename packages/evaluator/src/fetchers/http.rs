//! HTTP-based fetcher implementation.
//!
//! Fetches a single page with reqwest and reduces HTML to its visible text
//! using the scraper crate.

use async_trait::async_trait;
use scraper::{Html, Node};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{EvaluationError, FetchError, FetchResult, Result};
use crate::traits::fetcher::Fetcher;

/// Default bound on a single page fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Elements whose text never reaches the reader.
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// HTTP fetcher that downloads one page and extracts its text.
///
/// Any non-success status or transport problem (including the timeout)
/// is reported as a [`FetchError`].
///
/// # Example
///
/// ```rust,ignore
/// use evaluator::fetchers::HttpFetcher;
///
/// let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5))?;
/// let text = fetcher.fetch("https://example.com").await?;
/// ```
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default 10 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; WebsiteEvaluator/0.1)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| EvaluationError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Transport {
                message: format!("request timed out after {}s", self.timeout.as_secs()),
            }
        } else {
            FetchError::transport(err)
        }
    }
}

/// Reduce an HTML document to its visible text, words separated by single spaces.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

fn is_html(content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) => ct.contains("html") || ct.contains("xml"),
        // Servers that omit the header almost always send HTML
        None => true,
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            self.transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "HTTP status not successful");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        let text = if is_html(content_type.as_deref()) {
            extract_text(&body)
        } else {
            body.trim().to_string()
        };

        debug!(url = %url, content_length = text.len(), "Page fetched successfully");
        Ok(text)
    }

    fn name(&self) -> &str {
        "http"
    }
}
