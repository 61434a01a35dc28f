use anzeige_core::{AppConfig, ExtractionResult, LocationMatch};

use crate::{dates, html, location, times};

/// Names scanned when no catalog file is available.
pub const DEFAULT_KNOWN_LOCATIONS: [&str; 10] = [
    "Hessental",
    "Heilbronn",
    "Stuttgart Mitte",
    "Stuttgart Nord",
    "Stuttgart West",
    "Stuttgart Ost",
    "Stuttgart Süd",
    "Mannheim",
    "Karlsruhe",
    "Freiburg",
];

const DEFAULT_FALLBACK_YEAR: i32 = 2025;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Year used for dates written as month and day only.
    pub fallback_year: i32,
    /// Catalog names, scanned in this order.
    pub known_locations: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fallback_year: DEFAULT_FALLBACK_YEAR,
            known_locations: DEFAULT_KNOWN_LOCATIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ExtractorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, known_locations: Vec<String>) -> Self {
        Self {
            fallback_year: config.fallback_year,
            known_locations,
        }
    }
}

/// Turns raw notification content into an [`ExtractionResult`].
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl ContentExtractor {
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn normalize(&self, content: &str) -> String {
        html::normalize(content)
    }

    #[must_use]
    pub fn extract_date(&self, text: &str) -> Option<String> {
        dates::extract_date(text, self.config.fallback_year)
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn extract_time(&self, text: &str) -> Option<String> {
        times::extract_time(text)
    }

    #[must_use]
    pub fn extract_location(&self, text: &str) -> Option<LocationMatch> {
        location::extract_location(text, &self.config.known_locations)
    }

    /// Normalizes `content` and runs every extractor over it.
    ///
    /// Never fails; any subset of fields may be absent.
    #[must_use]
    pub fn parse_email_content(&self, content: &str) -> ExtractionResult {
        let text = self.normalize(content);

        let result = ExtractionResult::new(
            self.extract_date(&text),
            self.extract_time(&text),
            self.extract_location(&text),
        );

        tracing::debug!(
            date = result.date.as_deref(),
            time = result.time.as_deref(),
            location = result.location_name(),
            confidence = result.confidence(),
            "content extracted"
        );

        result
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
