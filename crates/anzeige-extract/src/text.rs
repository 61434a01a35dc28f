//! Small text helpers shared by the extractors.

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Maps an English month name or three-letter abbreviation (any case,
/// optional trailing dot) to its 1-based number.
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim().trim_end_matches('.').to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .or_else(|| MONTH_ABBREVIATIONS.iter().position(|m| *m == lower))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// Case-insensitive substring test. An empty needle never matches.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trims every line, splits lines on runs of two spaces, and drops blank
/// chunks. Chunks are joined with `\n`.
#[must_use]
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_number_full_names() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("FEBRUARY"), Some(2));
        assert_eq!(month_number("december"), Some(12));
    }

    #[test]
    fn month_number_abbreviations() {
        assert_eq!(month_number("Feb"), Some(2));
        assert_eq!(month_number("sep."), Some(9));
        assert_eq!(month_number("May"), Some(5));
    }

    #[test]
    fn month_number_rejects_unknown() {
        assert_eq!(month_number("Februar"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn contains_ignore_case_matches_mixed_case() {
        assert!(contains_ignore_case("Bericht aus STUTTGART Süd", "Stuttgart süd"));
        assert!(!contains_ignore_case("Heilbronn", "Mannheim"));
    }

    #[test]
    fn contains_ignore_case_empty_needle_never_matches() {
        assert!(!contains_ignore_case("anything", ""));
    }

    #[test]
    fn collapse_lines_drops_blank_lines_and_splits_double_spaces() {
        let input = "  Betreff: Diebstahl  \n\n\n  Filiale  Hessental \n";
        assert_eq!(collapse_lines(input), "Betreff: Diebstahl\nFiliale\nHessental");
    }
}
