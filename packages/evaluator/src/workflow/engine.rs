//! The evaluation engine: drives the stage graph for one URL.

use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

use crate::error::Result;
use crate::interpret::{ResponseInterpreter, TextualInterpreter};
use crate::traits::{ai::AI, fetcher::Fetcher};
use crate::types::config::EvaluatorConfig;
use crate::types::result::EvaluationResult;
use crate::types::state::EvaluationState;
use crate::workflow::stage::Stage;
use crate::workflow::stages::StageContext;

/// Runs evaluations against a reasoning service and a content fetcher.
///
/// One `Evaluator` may serve many concurrent runs; each run owns its own
/// [`EvaluationState`]. The only thing runs share is whatever the fetcher
/// shares (typically a [`CachedFetcher`](crate::fetchers::CachedFetcher)).
///
/// # Example
///
/// ```rust,ignore
/// use evaluator::{Evaluator, EvaluatorConfig, Locale};
/// use evaluator::ai::OpenAI;
/// use evaluator::fetchers::{CachedFetcher, HttpFetcher};
///
/// let evaluator = Evaluator::new(
///     OpenAI::new(api_key),
///     CachedFetcher::with_default_capacity(HttpFetcher::new()?),
/// )
/// .with_config(EvaluatorConfig::default().with_locale(Locale::Portuguese));
///
/// let result = evaluator.evaluate("https://example.com").await?;
/// println!("{}: {}", result.rating, result.final_summary);
/// ```
#[derive(Clone)]
pub struct Evaluator {
    ai: Arc<dyn AI>,
    fetcher: Arc<dyn Fetcher>,
    interpreter: Option<Arc<dyn ResponseInterpreter>>,
    default_interpreter: TextualInterpreter,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(ai: impl AI + 'static, fetcher: impl Fetcher + 'static) -> Self {
        let config = EvaluatorConfig::default();
        Self {
            ai: Arc::new(ai),
            fetcher: Arc::new(fetcher),
            interpreter: None,
            default_interpreter: TextualInterpreter::new(config.locale),
            config,
        }
    }

    /// Replace the configuration. The default interpreter follows its locale.
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.default_interpreter = TextualInterpreter::new(config.locale);
        self.config = config;
        self
    }

    /// Use a custom interpreter instead of the locale's textual one.
    pub fn with_interpreter(mut self, interpreter: impl ResponseInterpreter + 'static) -> Self {
        self.interpreter = Some(Arc::new(interpreter));
        self
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    fn interpreter(&self) -> &dyn ResponseInterpreter {
        match &self.interpreter {
            Some(custom) => custom.as_ref(),
            None => &self.default_interpreter,
        }
    }

    /// Run the workflow to completion and return the final state.
    ///
    /// Fails only when the reasoning service fails; no partial state is
    /// returned in that case.
    pub async fn run(&self, url: &str) -> Result<EvaluationState> {
        let span = info_span!("evaluation", url = %url, locale = %self.config.locale);

        async {
            let ctx = StageContext {
                ai: self.ai.as_ref(),
                fetcher: self.fetcher.as_ref(),
                interpreter: self.interpreter(),
                config: &self.config,
            };

            info!(
                ai = self.ai.name(),
                fetcher = self.fetcher.name(),
                max_iterations = self.config.max_iterations,
                "Starting evaluation"
            );

            let mut state = EvaluationState::new(url);
            let mut cursor = Some(Stage::ENTRY);

            while let Some(stage) = cursor {
                debug!(stage = %stage, iterations = state.iterations, "Executing stage");
                let update = ctx.execute(stage, &state).await?;
                state.apply(update);
                cursor = stage.next(&state);
            }

            info!(
                iterations = state.iterations,
                insights = state.insights.len(),
                rating = state.rating,
                "Evaluation complete"
            );

            Ok(state)
        }
        .instrument(span)
        .await
    }

    /// Run the workflow and project the final state into an [`EvaluationResult`].
    pub async fn evaluate(&self, url: &str) -> Result<EvaluationResult> {
        self.run(url).await.map(EvaluationResult::from)
    }
}
