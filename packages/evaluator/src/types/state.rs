//! The record threaded through one evaluation run.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::workflow::stage::Stage;

/// Mutable state owned by exactly one in-flight run.
///
/// Stages never write to it directly; they return a [`StateUpdate`] that
/// the engine merges with [`EvaluationState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationState {
    pub url: String,
    pub descriptor: String,
    pub insights: Vec<String>,
    pub market_trends: String,
    pub iterations: u32,
    pub sufficient: bool,
    pub final_summary: String,
    pub rating: i64,
    /// Stages in the order they executed.
    pub stages: Vec<Stage>,
}

impl EvaluationState {
    /// Fresh state with every accumulator empty.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Insights joined for prompt embedding, or `placeholder` when there are none.
    pub fn joined_insights(&self, placeholder: &str) -> String {
        if self.insights.is_empty() {
            placeholder.to_string()
        } else {
            self.insights.join(", ")
        }
    }

    /// Whether `Finalize` has run.
    pub fn is_finalized(&self) -> bool {
        self.stages.last() == Some(&Stage::Finalize)
    }

    /// Merge a partial update produced by a stage.
    ///
    /// Write-once fields keep their first value, insights only grow, and
    /// the iteration counter never moves backwards.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(descriptor) = update.descriptor {
            if self.stages.contains(&Stage::Describe) {
                warn!(url = %self.url, "Ignoring second descriptor write");
            } else {
                self.descriptor = descriptor;
            }
        }

        if let Some(insight) = update.insight {
            self.insights.push(insight);
        }

        if let Some(trends) = update.market_trends {
            self.market_trends = trends;
        }

        if let Some(iterations) = update.iterations {
            self.iterations = self.iterations.max(iterations);
        }

        if let Some(sufficient) = update.sufficient {
            self.sufficient = sufficient;
        }

        if let Some((summary, rating)) = update.verdict {
            if self.is_finalized() {
                warn!(url = %self.url, "Ignoring second verdict write");
            } else {
                self.final_summary = summary;
                self.rating = rating;
            }
        }

        self.stages.push(update.stage);
    }
}

/// Partial update returned by one stage execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    /// Stage that produced this update.
    pub stage: Stage,
    pub descriptor: Option<String>,
    /// Insight to append.
    pub insight: Option<String>,
    pub market_trends: Option<String>,
    pub iterations: Option<u32>,
    pub sufficient: Option<bool>,
    /// Final narrative and extracted rating.
    pub verdict: Option<(String, i64)>,
}

impl StateUpdate {
    /// Empty update for a stage.
    pub fn for_stage(stage: Stage) -> Self {
        Self {
            stage,
            descriptor: None,
            insight: None,
            market_trends: None,
            iterations: None,
            sufficient: None,
            verdict: None,
        }
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.insight = Some(insight.into());
        self
    }

    pub fn with_market_trends(mut self, trends: impl Into<String>) -> Self {
        self.market_trends = Some(trends.into());
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn with_sufficient(mut self, sufficient: bool) -> Self {
        self.sufficient = Some(sufficient);
        self
    }

    pub fn with_verdict(mut self, summary: impl Into<String>, rating: i64) -> Self {
        self.verdict = Some((summary.into(), rating));
        self
    }
}
