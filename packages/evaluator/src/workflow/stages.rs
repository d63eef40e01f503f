//! Stage logic: prompt construction and response interpretation.
//!
//! Each stage reads the current state and returns a [`StateUpdate`]. Only
//! reasoning service failures propagate; fetch failures become data.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::interpret::ResponseInterpreter;
use crate::prompts;
use crate::traits::{ai::AI, fetcher::Fetcher};
use crate::types::config::EvaluatorConfig;
use crate::types::state::{EvaluationState, StateUpdate};
use crate::workflow::stage::Stage;

/// Collaborators a stage may call.
pub struct StageContext<'a> {
    pub ai: &'a dyn AI,
    pub fetcher: &'a dyn Fetcher,
    pub interpreter: &'a dyn ResponseInterpreter,
    pub config: &'a EvaluatorConfig,
}

impl StageContext<'_> {
    /// Run one stage against the current state.
    pub async fn execute(&self, stage: Stage, state: &EvaluationState) -> Result<StateUpdate> {
        match stage {
            Stage::Describe => self.describe(state).await,
            Stage::Decide => self.decide(state).await,
            Stage::Deepen => self.deepen(state).await,
            Stage::Finalize => self.finalize(state).await,
        }
    }

    async fn describe(&self, state: &EvaluationState) -> Result<StateUpdate> {
        let update = StateUpdate::for_stage(Stage::Describe);

        let content = match self.fetcher.fetch(&state.url).await {
            Ok(content) => content,
            Err(e) => {
                warn!(url = %state.url, error = %e, "Fetch failed, continuing with failure as descriptor");
                return Ok(update.with_descriptor(e.message()));
            }
        };

        let snippet = prompts::snippet(&content, self.config.snippet_chars);
        debug!(
            url = %state.url,
            content_chars = content.chars().count(),
            snippet_chars = snippet.chars().count(),
            "Summarizing page"
        );

        let prompt = prompts::format_describe_prompt(self.config.locale, snippet);
        let descriptor = self.ai.complete(&prompt).await?;

        Ok(update.with_descriptor(descriptor.trim()))
    }

    async fn decide(&self, state: &EvaluationState) -> Result<StateUpdate> {
        let update = StateUpdate::for_stage(Stage::Decide);

        if state.iterations >= self.config.max_iterations {
            info!(iterations = state.iterations, "Iteration cap reached, forcing sufficiency");
            return Ok(update.with_sufficient(true));
        }

        let locale = self.config.locale;
        let prompt = prompts::format_sufficiency_prompt(
            locale,
            &state.descriptor,
            &state.joined_insights(locale.none_placeholder()),
        );
        let answer = self.ai.complete(&prompt).await?;
        let sufficient = self.interpreter.is_sufficient(&answer);

        debug!(iterations = state.iterations, sufficient, "Sufficiency decided");
        Ok(update.with_sufficient(sufficient))
    }

    async fn deepen(&self, state: &EvaluationState) -> Result<StateUpdate> {
        let locale = self.config.locale;
        let iterations = state.iterations + 1;

        let insight_prompt = prompts::format_insight_prompt(
            locale,
            &state.descriptor,
            &state.joined_insights(locale.none_placeholder()),
        );
        let insight = self.ai.complete(&insight_prompt).await?;
        let insight = insight.trim();

        let trends_prompt = prompts::format_trends_prompt(locale, &state.descriptor, insight);
        let trends = self.ai.complete(&trends_prompt).await?;

        debug!(iterations, "Deepen pass complete");
        Ok(StateUpdate::for_stage(Stage::Deepen)
            .with_iterations(iterations)
            .with_insight(insight)
            .with_market_trends(trends.trim()))
    }

    async fn finalize(&self, state: &EvaluationState) -> Result<StateUpdate> {
        let locale = self.config.locale;
        let prompt = prompts::format_verdict_prompt(
            locale,
            &state.descriptor,
            &state.joined_insights(locale.none_placeholder()),
            &state.market_trends,
        );
        let answer = self.ai.complete(&prompt).await?;
        let verdict = self.interpreter.parse_verdict(&answer);

        if verdict.rating.is_none() {
            warn!(url = %state.url, "No rating found in verdict, using sentinel");
        }

        let rating = verdict.rating_or_sentinel();
        Ok(StateUpdate::for_stage(Stage::Finalize).with_verdict(verdict.summary, rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetchers::MockFetcher;
    use crate::interpret::TextualInterpreter;
    use crate::testing::MockAI;
    use crate::types::config::Locale;

    struct Fixture {
        ai: MockAI,
        fetcher: MockFetcher,
        interpreter: TextualInterpreter,
        config: EvaluatorConfig,
    }

    impl Fixture {
        fn new(ai: MockAI, fetcher: MockFetcher) -> Self {
            Self {
                ai,
                fetcher,
                interpreter: TextualInterpreter::new(Locale::English),
                config: EvaluatorConfig::default(),
            }
        }

        fn ctx(&self) -> StageContext<'_> {
            StageContext {
                ai: &self.ai,
                fetcher: &self.fetcher,
                interpreter: &self.interpreter,
                config: &self.config,
            }
        }
    }

    #[tokio::test]
    async fn test_describe_truncates_snippet() {
        let long_page = "x".repeat(5000);
        let fixture = Fixture::new(
            MockAI::new().with_default("  A rocket company.  "),
            MockFetcher::new().with_page("https://acme.com", long_page),
        );
        let state = EvaluationState::new("https://acme.com");

        let update = fixture.ctx().execute(Stage::Describe, &state).await.unwrap();

        assert_eq!(update.descriptor.as_deref(), Some("A rocket company."));
        let prompts = fixture.ai.prompts();
        let prompt = &prompts[0];
        assert!(prompt.contains(&"x".repeat(1000)));
        assert!(!prompt.contains(&"x".repeat(1001)));
    }

    #[tokio::test]
    async fn test_describe_stores_fetch_failure_without_calling_ai() {
        let fixture = Fixture::new(
            MockAI::new(),
            MockFetcher::new().with_failure("https://down.com", FetchError::Status { status: 502 }),
        );
        let state = EvaluationState::new("https://down.com");

        let update = fixture.ctx().execute(Stage::Describe, &state).await.unwrap();

        assert_eq!(
            update.descriptor.as_deref(),
            Some("Error: Unable to fetch website content (status 502)")
        );
        assert_eq!(fixture.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_decide_at_cap_skips_ai() {
        let fixture = Fixture::new(MockAI::new(), MockFetcher::new());
        let mut state = EvaluationState::new("https://acme.com");
        state.iterations = 3;

        let update = fixture.ctx().execute(Stage::Decide, &state).await.unwrap();

        assert_eq!(update.sufficient, Some(true));
        assert_eq!(fixture.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_decide_ambiguous_answer_is_insufficient() {
        let fixture = Fixture::new(
            MockAI::new().with_default("Hard to say without more data."),
            MockFetcher::new(),
        );
        let state = EvaluationState::new("https://acme.com");

        let update = fixture.ctx().execute(Stage::Decide, &state).await.unwrap();

        assert_eq!(update.sufficient, Some(false));
        assert!(fixture.ai.prompts()[0].contains("insights so far: None"));
    }

    #[tokio::test]
    async fn test_deepen_makes_two_sequential_calls() {
        let fixture = Fixture::new(
            MockAI::new()
                .with_rule("additional insight or factor", ["Regulation is tightening."])
                .with_rule("updated, brief summary", ["Demand for launches grows."]),
            MockFetcher::new(),
        );
        let mut state = EvaluationState::new("https://acme.com");
        state.descriptor = "Rocket maker".into();

        let update = fixture.ctx().execute(Stage::Deepen, &state).await.unwrap();

        assert_eq!(update.iterations, Some(1));
        assert_eq!(update.insight.as_deref(), Some("Regulation is tightening."));
        assert_eq!(update.market_trends.as_deref(), Some("Demand for launches grows."));

        let prompts = fixture.ai.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("new insight 'Regulation is tightening.'"));
    }

    #[tokio::test]
    async fn test_finalize_without_rating_uses_sentinel() {
        let fixture = Fixture::new(
            MockAI::new().with_default("Final Summary: Interesting but unproven."),
            MockFetcher::new(),
        );
        let state = EvaluationState::new("https://acme.com");

        let update = fixture.ctx().execute(Stage::Finalize, &state).await.unwrap();

        assert_eq!(
            update.verdict,
            Some(("Final Summary: Interesting but unproven.".to_string(), 0))
        );
    }
}
