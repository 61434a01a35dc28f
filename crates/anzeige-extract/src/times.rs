//! Incident time extraction, normalized to a 24-hour `HH:MM`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TIME_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // 9:24, 09.24, 14:30 Uhr, 9:24 PM, 21.15h
        Regex::new(r"(\d{1,2})[:.](\d{2})(?:\s*((?i:uhr|am|pm|h))\b)?")
            .expect("valid time regex"),
        // 09:24:00
        Regex::new(r"(\d{1,2}):(\d{2}):\d{2}").expect("valid time regex"),
        // 9:24PM
        Regex::new(r"(\d{1,2}):(\d{2})\s*([AaPp][Mm])").expect("valid time regex"),
    ]
});

/// Extracts the first plausible time of day from `text`.
///
/// A trailing `Uhr`/`h` marker is ignored; `AM`/`PM` converts to the
/// 24-hour clock. Digits that are part of a longer numeric run (the
/// `09.02` of `09.02.2025`) and out-of-range values are not times.
#[must_use]
pub fn extract_time(text: &str) -> Option<String> {
    TIME_PATTERNS.iter().find_map(|re| {
        re.captures_iter(text)
            .find_map(|caps| to_time(text, &caps))
            .map(|(hour, minute)| format!("{hour:02}:{minute:02}"))
    })
}

fn to_time(text: &str, caps: &Captures<'_>) -> Option<(u32, u32)> {
    let hour_match = caps.get(1)?;
    let minute_match = caps.get(2)?;
    if is_embedded_in_number(text, hour_match.start(), minute_match.end()) {
        return None;
    }

    let hour = hour_match.as_str().parse::<u32>().ok()?;
    let minute = minute_match.as_str().parse::<u32>().ok()?;
    if minute > 59 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("PM") => to_24_hour(hour, true).map(|h| (h, minute)),
        Some("AM") => to_24_hour(hour, false).map(|h| (h, minute)),
        _ if hour <= 23 => Some((hour, minute)),
        _ => None,
    }
}

fn to_24_hour(hour: u32, pm: bool) -> Option<u32> {
    match (hour, pm) {
        (h, _) if h == 0 || h > 12 => None,
        (12, false) => Some(0),
        (12, true) => Some(12),
        (h, true) => Some(h + 12),
        (h, false) => Some(h),
    }
}

/// `true` when `start..end` continues a digit run on the left, or is
/// followed by another date-style separator and digit on the right.
fn is_embedded_in_number(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let left_embedded = match before {
        Some(c) if c.is_ascii_digit() => true,
        Some('.' | '/' | '-' | ':') => text[..start]
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    };

    let mut after = text[end..].chars();
    let right_embedded = match (after.next(), after.next()) {
        (Some(c), _) if c.is_ascii_digit() => true,
        (Some('.' | '/' | '-'), Some(d)) => d.is_ascii_digit(),
        _ => false,
    };

    left_embedded || right_embedded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_twenty_four_hour_time() {
        assert_eq!(extract_time("09:24").as_deref(), Some("09:24"));
        assert_eq!(extract_time("um 14:30 Uhr").as_deref(), Some("14:30"));
    }

    #[test]
    fn single_digit_hour_is_padded() {
        assert_eq!(extract_time("gegen 9:05").as_deref(), Some("09:05"));
    }

    #[test]
    fn dot_separator_and_h_suffix() {
        assert_eq!(extract_time("Zeit: 21.15h").as_deref(), Some("21:15"));
    }

    #[test]
    fn pm_adds_twelve_hours() {
        assert_eq!(extract_time("9:24 PM").as_deref(), Some("21:24"));
        assert_eq!(extract_time("9:24PM").as_deref(), Some("21:24"));
        assert_eq!(extract_time("12:10 PM").as_deref(), Some("12:10"));
    }

    #[test]
    fn meridiem_marker_is_case_insensitive() {
        assert_eq!(extract_time("9:24 Pm").as_deref(), Some("21:24"));
        assert_eq!(extract_time("9:24 pM").as_deref(), Some("21:24"));
        assert_eq!(extract_time("12:05 Am").as_deref(), Some("00:05"));
        assert_eq!(extract_time("14:30 UHR").as_deref(), Some("14:30"));
    }

    #[test]
    fn am_keeps_hour_except_midnight() {
        assert_eq!(extract_time("12:00 AM").as_deref(), Some("00:00"));
        assert_eq!(extract_time("7:45 am").as_deref(), Some("07:45"));
    }

    #[test]
    fn seconds_are_discarded() {
        assert_eq!(extract_time("Zeitstempel 09:24:59").as_deref(), Some("09:24"));
    }

    #[test]
    fn date_digits_are_not_a_time() {
        assert_eq!(extract_time("Datum: 09.02.2025"), None);
        assert_eq!(
            extract_time("Datum: 09.02.2025, Uhrzeit: 16:40").as_deref(),
            Some("16:40")
        );
    }

    #[test]
    fn out_of_range_values_are_skipped() {
        assert_eq!(extract_time("Betrag 45.99"), None);
        assert_eq!(extract_time("Betrag 45.99, Zeit 08:15").as_deref(), Some("08:15"));
        assert_eq!(extract_time("13:00 PM"), None);
    }

    #[test]
    fn marker_must_be_a_whole_word() {
        // "am" inside "amount" is not a meridiem marker.
        assert_eq!(extract_time("10.30 amount").as_deref(), Some("10:30"));
    }

    #[test]
    fn no_time_is_none() {
        assert_eq!(extract_time("keine Uhrzeit"), None);
    }
}
