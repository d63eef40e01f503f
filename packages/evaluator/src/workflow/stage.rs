//! Workflow stages, transitions, and the decision router.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::state::EvaluationState;

/// One node of the evaluation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Fetch the page and summarize it in one line.
    Describe,
    /// Ask whether enough is known to finalize.
    Decide,
    /// Gather one more insight and refresh market trends.
    Deepen,
    /// Produce the narrative verdict and rating.
    Finalize,
}

impl Stage {
    /// First stage after the virtual start.
    pub const ENTRY: Stage = Stage::Describe;

    /// Node name used in logs and diagrams.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Describe => "describe",
            Self::Decide => "decide",
            Self::Deepen => "deepen",
            Self::Finalize => "finalize",
        }
    }

    /// Follow the edge leaving this stage. `None` means the workflow ended.
    ///
    /// `Decide` is the only conditional edge and defers to [`route`].
    pub fn next(&self, state: &EvaluationState) -> Option<Stage> {
        match self {
            Self::Describe => Some(Self::Decide),
            Self::Decide => Some(route(state)),
            Self::Deepen => Some(Self::Decide),
            Self::Finalize => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Branch selector consulted after `Decide`.
pub fn route(state: &EvaluationState) -> Stage {
    if state.sufficient {
        Stage::Finalize
    } else {
        Stage::Deepen
    }
}

/// Render the stage graph as a Mermaid flowchart.
pub fn mermaid_diagram() -> String {
    let mut lines = vec![
        "graph TD;".to_string(),
        "    __start__([start]):::first".to_string(),
    ];
    for stage in [Stage::Describe, Stage::Decide, Stage::Deepen, Stage::Finalize] {
        lines.push(format!("    {}({})", stage.name(), stage.name()));
    }
    lines.push("    __end__([end]):::last".to_string());
    lines.push(format!("    __start__ --> {};", Stage::ENTRY));
    lines.push(format!("    {} --> {};", Stage::Describe, Stage::Decide));
    lines.push(format!("    {} -. sufficient .-> {};", Stage::Decide, Stage::Finalize));
    lines.push(format!("    {} -. insufficient .-> {};", Stage::Decide, Stage::Deepen));
    lines.push(format!("    {} --> {};", Stage::Deepen, Stage::Decide));
    lines.push(format!("    {} --> __end__;", Stage::Finalize));
    lines.push("    classDef first fill-opacity:0".to_string());
    lines.push("    classDef last fill:#bfb6fc".to_string());
    lines.join("\n")
}
