//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the evaluator
//! without making real reasoning-service calls. Pair [`MockAI`] with
//! [`MockFetcher`](crate::fetchers::MockFetcher) for fully offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{EvaluationError, Result};
use crate::traits::ai::AI;

/// A scripted AI for testing.
///
/// Responses are chosen by the first rule whose needle occurs in the prompt.
/// A rule's responses are consumed in order and the last one repeats.
/// Prompts matching no rule get the default response, or an error when no
/// default is set.
#[derive(Default, Clone)]
pub struct MockAI {
    rules: Arc<RwLock<Vec<ScriptedRule>>>,
    failures: Arc<RwLock<Vec<String>>>,
    default_response: Option<String>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

#[derive(Debug)]
struct ScriptedRule {
    needle: String,
    responses: VecDeque<String>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub struct MockAICall {
    pub prompt: String,
    /// Needle of the rule that answered, if any.
    pub matched: Option<String>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer prompts containing `needle` with `responses`, in order.
    pub fn with_rule<I, S>(self, needle: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let responses: VecDeque<String> = responses.into_iter().map(Into::into).collect();
        if !responses.is_empty() {
            self.rules.write().unwrap().push(ScriptedRule {
                needle: needle.into(),
                responses,
            });
        }
        self
    }

    /// Response for prompts that match no rule.
    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    /// Fail every prompt containing `needle`.
    pub fn with_failure_on(self, needle: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(needle.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.prompt).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Number of prompts that contained `needle`.
    pub fn calls_containing(&self, needle: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.prompt.contains(needle))
            .count()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn respond(&self, prompt: &str) -> (Option<String>, Option<String>) {
        let mut rules = self.rules.write().unwrap();
        for rule in rules.iter_mut() {
            if prompt.contains(&rule.needle) {
                let response = if rule.responses.len() > 1 {
                    rule.responses.pop_front()
                } else {
                    rule.responses.front().cloned()
                };
                return (Some(rule.needle.clone()), response);
            }
        }
        (None, self.default_response.clone())
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let failing = self
            .failures
            .read()
            .unwrap()
            .iter()
            .find(|needle| prompt.contains(needle.as_str()))
            .cloned();

        if let Some(needle) = failing {
            self.calls.write().unwrap().push(MockAICall {
                prompt: prompt.to_string(),
                matched: Some(needle.clone()),
            });
            return Err(EvaluationError::ai(format!(
                "scripted failure for prompt containing '{}'",
                needle
            )));
        }

        let (matched, response) = self.respond(prompt);
        self.calls.write().unwrap().push(MockAICall {
            prompt: prompt.to_string(),
            matched,
        });

        response.ok_or_else(|| EvaluationError::ai("no scripted response for prompt"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rule_responses_are_consumed_then_repeat() {
        let ai = MockAI::new().with_rule("enough", ["no", "yes"]);

        assert_eq!(ai.complete("enough?").await.unwrap(), "no");
        assert_eq!(ai.complete("enough?").await.unwrap(), "yes");
        assert_eq!(ai.complete("enough?").await.unwrap(), "yes");
        assert_eq!(ai.calls_containing("enough"), 3);
    }

    #[tokio::test]
    async fn test_first_matching_rule_wins() {
        let ai = MockAI::new()
            .with_rule("alpha", ["first"])
            .with_rule("alpha beta", ["second"]);

        assert_eq!(ai.complete("alpha beta").await.unwrap(), "first");
        assert_eq!(ai.calls()[0].matched.as_deref(), Some("alpha"));
    }

    #[tokio::test]
    async fn test_unmatched_prompt_without_default_fails() {
        let ai = MockAI::new().with_rule("alpha", ["first"]);

        assert!(ai.complete("gamma").await.is_err());
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_takes_precedence() {
        let ai = MockAI::new()
            .with_default("fine")
            .with_failure_on("boom");

        assert!(matches!(
            ai.complete("boom now").await,
            Err(EvaluationError::AI(_))
        ));
        assert_eq!(ai.complete("quiet").await.unwrap(), "fine");

        ai.clear_calls();
        assert_eq!(ai.call_count(), 0);
    }
}
