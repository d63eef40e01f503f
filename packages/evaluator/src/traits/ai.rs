//! AI trait for LLM completions.
//!
//! The workflow only needs one capability from a language model: turn a
//! prompt into free text. There is no semantic contract beyond a
//! best-effort natural-language answer; interpretation of that text lives
//! in [`crate::interpret`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// AI trait for LLM operations.
///
/// Implementations wrap specific providers (OpenAI, Groq, etc.). Calls are
/// attempted exactly once; any error aborts the evaluation.
#[async_trait]
pub trait AI: Send + Sync {
    /// Complete a prompt and return the raw text response.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the provider name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: AI + ?Sized> AI for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
