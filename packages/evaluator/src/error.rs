//! Typed errors for the evaluator library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only reasoning
//! service failures abort a run; fetch failures are carried as data.

use thiserror::Error;

/// Marker that starts every fetch failure message stored in a descriptor.
pub const FETCH_FAILURE_MARKER: &str = "Error:";

/// Errors that abort an evaluation.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl EvaluationError {
    /// Wrap any message as an AI service failure.
    pub fn ai(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::AI(message.into())
    }
}

/// Failure reported by a content fetcher.
///
/// Both variants render with [`FETCH_FAILURE_MARKER`] so the workflow can
/// store them verbatim as the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("Error: Unable to fetch website content (status {status})")]
    Status { status: u16 },

    /// Request never completed (DNS, connect, TLS, timeout, body read)
    #[error("Error: Unable to fetch website content ({message})")]
    Transport { message: String },
}

impl FetchError {
    /// Create a transport failure from any displayable error.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }

    /// The text stored in the descriptor for this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
