//! CLI for running a single website evaluation
//!
//! Uses the same environment configuration as the API server. Prints a
//! human-readable report, or the JSON result with `--json`.

use anyhow::{Context, Result};
use clap::Parser;
use evaluator::{EvaluationResult, Locale};
use server_core::{server::AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "evaluate_cli")]
#[command(about = "Evaluate a website's business idea with an LLM")]
struct Cli {
    /// Website to evaluate
    url: String,

    /// Prompt language (en or pt); overrides EVALUATION_LOCALE
    #[arg(long)]
    locale: Option<Locale>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,evaluator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let state = AppState::from_config(&config)?;
    let result = state
        .evaluator
        .evaluate(&cli.url)
        .await
        .with_context(|| format!("Evaluation of {} failed", cli.url))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &EvaluationResult) {
    println!("URL:         {}", result.url);
    println!("Descriptor:  {}", result.descriptor);
    println!("Iterations:  {}", result.iterations);
    if !result.insights.is_empty() {
        println!("Insights:");
        for insight in &result.insights {
            println!("  - {}", insight);
        }
    }
    if !result.market_trends.is_empty() {
        println!("Trends:      {}", result.market_trends);
    }
    println!();
    println!("{}", result.final_summary);
    println!();
    println!("Rating:      {}/10", result.rating);
}
