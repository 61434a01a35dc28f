use anzeige_core::{AppConfig, Location, DEFAULT_STUB_PLACEHOLDER};

use crate::error::ResolveError;
use crate::similarity::similarity;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Floor applied when the input is a substring of the candidate name.
const INPUT_CONTAINED_FLOOR: f64 = 0.8;
/// Floor applied when the candidate name is a substring of the input.
const NAME_CONTAINED_FLOOR: f64 = 0.7;
/// Discount for a candidate matched by city rather than by name.
const CITY_MATCH_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Minimum fuzzy score accepted as a match.
    pub threshold: f64,
    /// City/state written into stub locations.
    pub stub_placeholder: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
            stub_placeholder: DEFAULT_STUB_PLACEHOLDER.to_string(),
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            threshold: config.fuzzy_threshold,
            stub_placeholder: config.stub_placeholder.clone(),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Best fuzzy candidate and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub location: &'a Location,
    pub score: f64,
}

/// How a name maps onto the catalog, without side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Exact(Location),
    Fuzzy { location: Location, score: f64 },
    NotFound,
}

impl Resolution {
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Exact(location) | Self::Fuzzy { location, .. } => Some(location),
            Self::NotFound => None,
        }
    }
}

/// First catalog entry whose name equals `name`, ignoring case and
/// surrounding whitespace.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArgument`] if `name` is blank.
pub fn get_by_exact_name<'a>(
    catalog: &'a [Location],
    name: &str,
) -> Result<Option<&'a Location>, ResolveError> {
    let wanted = normalized_name(name)?;
    Ok(catalog
        .iter()
        .find(|location| location.name.trim().to_lowercase() == wanted))
}

/// Best-scoring catalog entry for `name`, if it reaches `threshold`.
///
/// An exact case-insensitive name match short-circuits with score `1.0`.
/// Otherwise each candidate scores the sequence similarity of the lowercased
/// names, raised to 0.8 when the input occurs inside the candidate name or to
/// 0.7 when the candidate name occurs inside the input. A candidate whose
/// city is more similar than that scores `city_similarity * 0.9` instead.
/// The earliest candidate wins ties.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArgument`] if `name` is blank or
/// `threshold` lies outside `[0, 1]`.
pub fn find_by_fuzzy_name<'a>(
    catalog: &'a [Location],
    name: &str,
    threshold: f64,
) -> Result<Option<FuzzyMatch<'a>>, ResolveError> {
    let input = normalized_name(name)?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ResolveError::InvalidArgument(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }

    let mut best: Option<FuzzyMatch<'a>> = None;
    for location in catalog {
        let candidate = location.name.to_lowercase();
        if candidate == input {
            return Ok(Some(FuzzyMatch {
                location,
                score: 1.0,
            }));
        }

        let score = candidate_score(&input, &candidate, &location.city.to_lowercase());
        if best.is_none_or(|b| score > b.score) {
            best = Some(FuzzyMatch { location, score });
        }
    }

    Ok(best.filter(|m| m.score >= threshold))
}

fn candidate_score(input: &str, candidate: &str, city: &str) -> f64 {
    let mut score = similarity(candidate, input);
    if candidate.contains(input) {
        score = score.max(INPUT_CONTAINED_FLOOR);
    } else if input.contains(candidate) {
        score = score.max(NAME_CONTAINED_FLOOR);
    }

    let city_score = similarity(city, input);
    if city_score > score {
        score = city_score * CITY_MATCH_FACTOR;
    }
    score
}

/// Exact match first, then fuzzy match at `config.threshold`.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArgument`] if `name` is blank or the
/// configured threshold lies outside `[0, 1]`.
pub fn resolve(
    catalog: &[Location],
    name: &str,
    config: &ResolverConfig,
) -> Result<Resolution, ResolveError> {
    if let Some(location) = get_by_exact_name(catalog, name)? {
        tracing::debug!(name, location_id = location.id, "exact location match");
        return Ok(Resolution::Exact(location.clone()));
    }

    match find_by_fuzzy_name(catalog, name, config.threshold)? {
        Some(FuzzyMatch { location, score }) => {
            tracing::debug!(
                name,
                location_id = location.id,
                matched = %location.name,
                score,
                "fuzzy location match"
            );
            Ok(Resolution::Fuzzy {
                location: location.clone(),
                score,
            })
        }
        None => Ok(Resolution::NotFound),
    }
}

/// Trimmed, lowercased form of `name`, the key every lookup compares on.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArgument`] if `name` is blank.
pub fn normalized_name(name: &str) -> Result<String, ResolveError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::InvalidArgument(
            "location name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
