//! Incident date extraction.
//!
//! Patterns are tried in a fixed order and the first pattern producing a
//! real calendar date wins:
//! 1. `February 09, 2025` / `February 09 2025`
//! 2. `Feb 09, 2025` / `Feb. 09 2025`
//! 3. `09.02.2025`, `09-02-2025`, `09/02/2025` (day first)
//! 4. `2025-02-09`
//! 5. `February 09` with no year, dated in the caller's fallback year
//!
//! Output is always `YYYY-MM-DD`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::text::month_number;

const FULL_MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const ABBREVIATED_MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
    MonthDay,
}

static DATE_PATTERNS: LazyLock<Vec<(Regex, FieldOrder)>> = LazyLock::new(|| {
    let compile = |pattern: String| Regex::new(&pattern).expect("valid date regex");
    vec![
        (
            compile(format!(r"(?i)({FULL_MONTHS})\s+(\d{{1,2}})\b(?:,|\s)\s*(\d{{4}})")),
            FieldOrder::MonthDayYear,
        ),
        (
            compile(format!(
                r"(?i)({ABBREVIATED_MONTHS})\.?\s+(\d{{1,2}})\b(?:,|\s)\s*(\d{{4}})"
            )),
            FieldOrder::MonthDayYear,
        ),
        (
            compile(r"(\d{1,2})[./-](\d{1,2})[./-](\d{4})".to_string()),
            FieldOrder::DayMonthYear,
        ),
        (
            compile(r"(\d{4})-(\d{1,2})-(\d{1,2})".to_string()),
            FieldOrder::YearMonthDay,
        ),
        (
            compile(format!(r"(?i)({FULL_MONTHS})\s+(\d{{1,2}})\b")),
            FieldOrder::MonthDay,
        ),
    ]
});

/// Extracts the first recognizable date from `text` as `YYYY-MM-DD`.
///
/// `fallback_year` is used only by the month-and-day pattern. Matches that
/// do not form a real date (`31.02.2025`) are skipped. Returns `None` rather
/// than guessing.
#[must_use]
pub fn extract_date(text: &str, fallback_year: i32) -> Option<String> {
    DATE_PATTERNS.iter().find_map(|(re, order)| {
        re.captures_iter(text)
            .find_map(|caps| to_date(&caps, *order, fallback_year))
            .map(|date| date.format("%Y-%m-%d").to_string())
    })
}

fn to_date(caps: &Captures<'_>, order: FieldOrder, fallback_year: i32) -> Option<NaiveDate> {
    let number = |idx: usize| caps.get(idx)?.as_str().parse::<u32>().ok();
    let year = |idx: usize| caps.get(idx)?.as_str().parse::<i32>().ok();

    let (y, m, d) = match order {
        FieldOrder::MonthDayYear => (year(3)?, month_number(&caps[1])?, number(2)?),
        FieldOrder::DayMonthYear => (year(3)?, number(2)?, number(1)?),
        FieldOrder::YearMonthDay => (year(1)?, number(2)?, number(3)?),
        FieldOrder::MonthDay => (fallback_year, month_number(&caps[1])?, number(2)?),
    };

    NaiveDate::from_ymd_opt(y, m, d)
}
