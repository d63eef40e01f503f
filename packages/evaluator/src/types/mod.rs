//! Data types for the evaluation workflow.

pub mod config;
pub mod result;
pub mod state;
