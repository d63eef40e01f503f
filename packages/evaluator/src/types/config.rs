//! Configuration types for the evaluation workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvaluationError;

/// Hard upper bound on `Deepen` passes.
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Number of page characters sent to the summarization prompt.
pub const DEFAULT_SNIPPET_CHARS: usize = 1000;

/// Language of prompts and of the tokens the interpreter looks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Locale {
    /// Short language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
        }
    }

    /// Token whose presence marks a sufficiency answer as affirmative.
    pub fn affirmative_token(&self) -> &'static str {
        match self {
            Self::English => "yes",
            Self::Portuguese => "sim",
        }
    }

    /// Label that precedes the numeric score in the final verdict.
    pub fn rating_marker(&self) -> &'static str {
        match self {
            Self::English => "Rating",
            Self::Portuguese => "Nota",
        }
    }

    /// Placeholder used in prompts when no insights exist yet.
    pub fn none_placeholder(&self) -> &'static str {
        match self {
            Self::English => "None",
            Self::Portuguese => "Nenhum",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match lang.as_str() {
            "en" | "english" => Ok(Self::English),
            "pt" | "portuguese" => Ok(Self::Portuguese),
            _ => Err(EvaluationError::Config(format!("unsupported locale: {}", s))),
        }
    }
}

/// Configuration for the evaluation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Maximum number of `Deepen` passes before `Decide` forces sufficiency.
    ///
    /// Default: 3.
    pub max_iterations: u32,

    /// Page prefix (in characters) sent for summarization.
    ///
    /// Bounds prompt size. Default: 1000.
    pub snippet_chars: usize,

    /// Prompt and interpretation language.
    pub locale: Locale,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            locale: Locale::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the snippet length.
    pub fn with_snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
