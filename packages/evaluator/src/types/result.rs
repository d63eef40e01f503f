//! The contract consumed by the API and UI layers.

use serde::{Deserialize, Serialize};

use crate::types::state::EvaluationState;
use crate::workflow::stage::Stage;

/// Terminal view of a completed evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub url: String,
    /// One-line summary of the site, or the fetch failure message.
    pub descriptor: String,
    /// Reasoning fragments in the order they were produced.
    pub insights: Vec<String>,
    pub market_trends: String,
    /// Extracted score; 0 when the verdict carried no parsable rating.
    pub rating: i64,
    /// Full verdict text as returned by the model.
    pub final_summary: String,
    pub iterations: u32,
    pub stages: Vec<Stage>,
}

impl From<EvaluationState> for EvaluationResult {
    fn from(state: EvaluationState) -> Self {
        Self {
            url: state.url,
            descriptor: state.descriptor,
            insights: state.insights,
            market_trends: state.market_trends,
            rating: state.rating,
            final_summary: state.final_summary,
            iterations: state.iterations,
            stages: state.stages,
        }
    }
}
