// Website Evaluator - API Core
//
// HTTP surface and configuration for the iterative website evaluation
// workflow. The workflow itself lives in the `evaluator` crate.

pub mod config;
pub mod server;

pub use config::*;
