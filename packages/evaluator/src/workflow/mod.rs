//! Evaluation workflow: the stage graph and the engine that walks it.
//!
//! ```text
//! Describe -> Decide --sufficient--> Finalize -> end
//!               ^  \--insufficient--> Deepen
//!               \________________________/
//! ```

mod engine;
pub mod stage;
pub mod stages;

pub use engine::Evaluator;
pub use stage::{mermaid_diagram, route, Stage};
pub use stages::StageContext;
