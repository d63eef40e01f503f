//! Core trait abstractions for the evaluator.
//!
//! These traits define the collaborators the workflow depends on:
//! a reasoning service that completes prompts and a content fetcher
//! that turns a URL into page text.

pub mod ai;
pub mod fetcher;
