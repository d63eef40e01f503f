//! Iterative Website Evaluation Library
//!
//! Given a URL, fetches the page, asks a language model for a one-line
//! description, then loops "do we know enough?" / "give me one more
//! insight" a bounded number of times before asking for a final verdict
//! with a 1-10 rating.
//!
//! # Usage
//!
//! ```rust,ignore
//! use evaluator::{Evaluator, MockFetcher};
//! use evaluator::testing::MockAI;
//!
//! let ai = MockAI::new()
//!     .with_rule("enough information", ["yes"])
//!     .with_rule("final business evaluation", ["Final Summary: Solid.; Rating: 8"])
//!     .with_default("A rocket company.");
//! let fetcher = MockFetcher::new().with_page("https://acme.com", "We build rockets.");
//!
//! let result = Evaluator::new(ai, fetcher).evaluate("https://acme.com").await?;
//! assert_eq!(result.rating, 8);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (AI, Fetcher)
//! - [`types`] - State, configuration and result types
//! - [`workflow`] - Stage graph and evaluation engine
//! - [`fetchers`] - HTTP, cached and mock fetchers
//! - [`interpret`] - Sufficiency and rating heuristics
//! - [`prompts`] - Localized prompt templates
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod fetchers;
pub mod interpret;
pub mod prompts;
pub mod testing;
pub mod traits;
pub mod types;
pub mod workflow;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{EvaluationError, FetchError, FETCH_FAILURE_MARKER};
pub use fetchers::{CacheStats, CachedFetcher, HttpFetcher, MockFetcher};
pub use interpret::{ResponseInterpreter, TextualInterpreter, Verdict, SENTINEL_RATING};
pub use traits::{ai::AI, fetcher::Fetcher};
pub use types::{
    config::{EvaluatorConfig, Locale, DEFAULT_MAX_ITERATIONS},
    result::EvaluationResult,
    state::{EvaluationState, StateUpdate},
};
pub use workflow::{mermaid_diagram, Evaluator, Stage};
