use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use evaluator::ai::{DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TEMPERATURE, GROQ_BASE_URL};
use evaluator::fetchers::{DEFAULT_CACHE_CAPACITY, DEFAULT_FETCH_TIMEOUT};
use evaluator::{EvaluatorConfig, Locale, DEFAULT_MAX_ITERATIONS};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_timeout: Duration,
    pub fetch_timeout: Duration,
    pub fetch_cache_capacity: usize,
    pub locale: Locale,
    pub max_iterations: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_api_key = ["LLM_API_KEY", "GROQ_API_KEY", "OPENAI_API_KEY"]
            .iter()
            .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| anyhow!("LLM_API_KEY (or GROQ_API_KEY / OPENAI_API_KEY) must be set"))?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", 8000)?,
            llm_api_key,
            llm_base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_or(&lookup, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            llm_timeout: Duration::from_secs(parse_or(
                &lookup,
                "LLM_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT.as_secs(),
            )?),
            fetch_timeout: Duration::from_secs(parse_or(
                &lookup,
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT.as_secs(),
            )?),
            fetch_cache_capacity: parse_or(
                &lookup,
                "FETCH_CACHE_CAPACITY",
                DEFAULT_CACHE_CAPACITY,
            )?,
            locale: parse_or(&lookup, "EVALUATION_LOCALE", Locale::default())?,
            max_iterations: parse_or(&lookup, "MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
        })
    }

    /// Workflow settings derived from this configuration.
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig::default()
            .with_locale(self.locale)
            .with_max_iterations(self.max_iterations)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
