//! Location-name extraction against a list of known catalog names.
//!
//! Three tiers, the first tier that matches wins:
//!
//! | tier | evidence                                        | confidence |
//! |------|-------------------------------------------------|------------|
//! | 1    | indicator phrase (`Store: X`, `Filiale X`, `X Standort`) | 0.9 |
//! | 2    | subject line `X Store_`                         | 0.95       |
//! | 3    | bare mention, keyword on the same line          | 0.85       |
//! | 3    | bare mention                                    | 0.7        |
//!
//! Tier 2 outranks tier 1 in confidence but runs after it; the whole-word
//! keyword in tier 1 keeps `Store_` subjects out of the indicator tier.

use std::sync::LazyLock;

use anzeige_core::LocationMatch;
use regex::Regex;

use crate::text::contains_ignore_case;

pub const INDICATOR_CONFIDENCE: f64 = 0.9;
pub const SUBJECT_LINE_CONFIDENCE: f64 = 0.95;
pub const KEYWORD_LINE_CONFIDENCE: f64 = 0.85;
pub const MENTION_CONFIDENCE: f64 = 0.7;

/// Words that mark a line as talking about a location.
pub const CONTEXT_KEYWORDS: [&str; 4] = ["store", "filiale", "standort", "location"];

static INDICATOR_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(?:store|filiale|standort|location):\s*([\p{L}\s]+)")
            .expect("valid indicator regex"),
        Regex::new(r"(?i)(?:store|filiale|standort|location)\s+([\p{L}\s]+)")
            .expect("valid indicator regex"),
        Regex::new(r"(?i)([\p{L}\s]+)\s+(?:store|filiale|standort|location)\b")
            .expect("valid indicator regex"),
    ]
});

static SUBJECT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{L}\s]+)\s+Store_").expect("valid subject regex"));

/// Guesses which known location `text` is about.
///
/// Returns the catalog spelling of the name and a confidence in `[0, 1]`,
/// or `None` when no known name is found. Catalog names are trimmed and
/// blank ones ignored.
#[must_use]
pub fn extract_location<S: AsRef<str>>(text: &str, known: &[S]) -> Option<LocationMatch> {
    let known: Vec<&str> = known
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .collect();
    if known.is_empty() {
        return None;
    }

    from_indicator_phrase(text, &known)
        .or_else(|| from_subject_line(text, &known))
        .or_else(|| from_mention(text, &known))
}

fn from_indicator_phrase(text: &str, known: &[&str]) -> Option<LocationMatch> {
    INDICATOR_PATTERNS.iter().find_map(|re| {
        let captured = re.captures(text)?.get(1)?.as_str().trim();
        let name = first_known_in(captured, known)?;
        tracing::debug!(location = name, phrase = captured, "indicator phrase matched");
        Some(matched(name, INDICATOR_CONFIDENCE))
    })
}

fn from_subject_line(text: &str, known: &[&str]) -> Option<LocationMatch> {
    let captured = SUBJECT_LINE_RE.captures(text)?.get(1)?.as_str().trim();
    let name = first_known_in(captured, known)?;
    tracing::debug!(location = name, "subject line matched");
    Some(matched(name, SUBJECT_LINE_CONFIDENCE))
}

fn from_mention(text: &str, known: &[&str]) -> Option<LocationMatch> {
    let name = first_known_in(text, known)?;
    let line = text.lines().find(|line| contains_ignore_case(line, name))?;
    let lower_line = line.to_lowercase();
    let confidence = if CONTEXT_KEYWORDS.iter().any(|kw| lower_line.contains(kw)) {
        KEYWORD_LINE_CONFIDENCE
    } else {
        MENTION_CONFIDENCE
    };
    tracing::debug!(location = name, confidence, "bare mention matched");
    Some(matched(name, confidence))
}

/// First catalog name, in catalog order, contained in `haystack`.
fn first_known_in<'a>(haystack: &str, known: &[&'a str]) -> Option<&'a str> {
    let lower = haystack.to_lowercase();
    known
        .iter()
        .copied()
        .find(|name| lower.contains(&name.to_lowercase()))
}

fn matched(name: &str, confidence: f64) -> LocationMatch {
    LocationMatch {
        name: name.to_string(),
        confidence,
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
