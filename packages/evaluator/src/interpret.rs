//! Interpretation of free-text model answers.
//!
//! The workflow asks the model two questions whose answers must become
//! data: "is this enough?" (a boolean) and "what is the score?" (an
//! integer). Both heuristics live behind [`ResponseInterpreter`] so they can
//! be replaced, e.g. by structured output, without touching the engine.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::config::Locale;

/// Rating used when the verdict carries no parsable score.
pub const SENTINEL_RATING: i64 = 0;

lazy_static! {
    static ref RATING_EN: Regex = rating_pattern(Locale::English.rating_marker());
    static ref RATING_PT: Regex = rating_pattern(Locale::Portuguese.rating_marker());
}

fn rating_pattern(marker: &str) -> Regex {
    // Colon is required; tolerates "Rating:7", "**Rating:** 7", "Rating: **7**"
    Regex::new(&format!(
        r"(?i)\b{}\b[*_]*\s*:\s*[*_]*\s*(\d+)",
        regex::escape(marker)
    ))
    .expect("valid rating pattern")
}

/// Parsed final answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The full narrative, as returned.
    pub summary: String,
    /// Score, when one could be found.
    pub rating: Option<i64>,
}

impl Verdict {
    /// The rating, or [`SENTINEL_RATING`] when extraction failed.
    pub fn rating_or_sentinel(&self) -> i64 {
        self.rating.unwrap_or(SENTINEL_RATING)
    }
}

/// Narrow interface over the fragile text heuristics.
pub trait ResponseInterpreter: Send + Sync {
    /// Whether a sufficiency answer is affirmative. Ambiguity means `false`.
    fn is_sufficient(&self, response: &str) -> bool;

    /// Split a verdict into narrative and rating. Never fails.
    fn parse_verdict(&self, response: &str) -> Verdict;
}

/// Token and pattern matching in the configured locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualInterpreter {
    locale: Locale,
}

impl TextualInterpreter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn rating_regex(&self) -> &'static Regex {
        match self.locale {
            Locale::English => &*RATING_EN,
            Locale::Portuguese => &*RATING_PT,
        }
    }
}

impl ResponseInterpreter for TextualInterpreter {
    fn is_sufficient(&self, response: &str) -> bool {
        response
            .to_lowercase()
            .contains(self.locale.affirmative_token())
    }

    fn parse_verdict(&self, response: &str) -> Verdict {
        let summary = response.trim().to_string();
        let rating = self
            .rating_regex()
            .captures(&summary)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok());

        Verdict { summary, rating }
    }
}
