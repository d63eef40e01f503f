//! OpenAI-compatible implementation of the AI trait.
//!
//! Talks to any `/chat/completions` endpoint that follows the OpenAI wire
//! format (OpenAI itself, Groq, local gateways).
//!
//! # Example
//!
//! ```rust,ignore
//! use evaluator::ai::OpenAI;
//!
//! let ai = OpenAI::new("gsk-...")
//!     .with_base_url(evaluator::ai::GROQ_BASE_URL)
//!     .with_model("meta-llama/llama-4-scout-17b-16e-instruct");
//! let text = ai.complete("Say hello").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{EvaluationError, Result};
use crate::traits::ai::AI;

/// OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Groq's OpenAI-compatible base URL.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model served by Groq.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default bound on one completion request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI-compatible chat completion client.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    base_url: String,
    timeout: Duration,
}

impl OpenAI {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: GROQ_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create from environment variable `OPENAI_API_KEY` against the OpenAI endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| EvaluationError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key).with_base_url(OPENAI_BASE_URL))
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set a custom base URL (for Groq, Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl AI for OpenAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let request = self.build_request(prompt);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Completion request failed");
                EvaluationError::AI(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Completion API error");
            return Err(EvaluationError::ai(format!(
                "completion API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| EvaluationError::AI(Box::new(e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| EvaluationError::ai("no completion returned"))?;

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat completion"
        );

        Ok(content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_builder() {
        let ai = OpenAI::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_temperature(0.2)
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(ai.model(), "gpt-4o-mini");
        assert_eq!(ai.temperature, 0.2);
        assert_eq!(ai.base_url(), "https://custom.api.com/v1");
        assert_eq!(ai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_target_groq() {
        let ai = OpenAI::new("gsk-test");
        assert_eq!(ai.base_url(), GROQ_BASE_URL);
        assert_eq!(ai.model(), DEFAULT_MODEL);
        assert_eq!(ai.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_request_wire_format() {
        let ai = OpenAI::new("sk-test").with_model("gpt-4o-mini");
        let json = serde_json::to_value(ai.build_request("Hello")).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert!(json["temperature"].is_number());
    }

    #[test]
    fn test_response_wire_format() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Yes."}}],"usage":{"total_tokens":3}}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("Yes."));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_ai_error() {
        let ai = OpenAI::new("sk-test")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));

        let err = ai.complete("Hello").await.unwrap_err();
        assert!(matches!(err, EvaluationError::AI(_)));
    }
}
