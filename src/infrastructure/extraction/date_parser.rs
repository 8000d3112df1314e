//! Locale-aware date recognition.
//!
//! Normalizes free-form dates ("15 марта 2023 г. 14:30", "2023-12-01T10:00:00",
//! "March 5, 2024") to the canonical `YYYY-MM-DD HH:MM:SS` form. Never fails:
//! anything unrecognised, or outside the plausible year window, yields `None`.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use crate::domain::entities::canonical_timestamp;
use crate::domain::text::collapse_whitespace;

/// Genitive Russian month names and their English equivalents.
pub const RU_MONTHS: &[(&str, &str)] = &[
    ("января", "January"),
    ("февраля", "February"),
    ("марта", "March"),
    ("апреля", "April"),
    ("мая", "May"),
    ("июня", "June"),
    ("июля", "July"),
    ("августа", "August"),
    ("сентября", "September"),
    ("октября", "October"),
    ("ноября", "November"),
    ("декабря", "December"),
];

/// Years outside this window are treated as misparsed noise.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 2001..=2029;

// Offsets are converted to UTC.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%SZ",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

// Dotted numeric dates are day-first; slashed and dashed ones month-first,
// falling back to day-first when the month would be out of range.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const RU_MONTH_ALTERNATION: &str =
    "января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря";

const EN_MONTH_ALTERNATION: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static RU_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){RU_MONTH_ALTERNATION}")).unwrap());

static YEAR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{4})\s*г(?:\.|\b)").unwrap());

static LOOSE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})\s*(\d{1,2}:\d{2})?").unwrap()
});

/// Patterns for [`DateParser::extract_from_text`], most specific first.
static TEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\d{{1,2}}\s+(?:{RU_MONTH_ALTERNATION})\s+\d{{4}}\s*(?:г\.?)?\s*\d{{1,2}}:\d{{2}}"),
        format!(r"(?i)\d{{1,2}}\s+(?:{RU_MONTH_ALTERNATION})\s+\d{{4}}(?:\s*г\.?)?"),
        r"\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4}".to_string(),
        r"\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:Z|[+-]\d{2}:?\d{2})?|Z)?)?"
            .to_string(),
        format!(r"(?i)(?:{EN_MONTH_ALTERNATION})\s+\d{{1,2}},?\s+\d{{4}}"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Stateless date normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a date string into canonical form.
    ///
    /// Tries direct parsing, then Russian month substitution, then a loose
    /// `day month year [HH:MM]` reconstruction.
    pub fn parse(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parsed = parse_direct(trimmed).or_else(|| parse_localized(trimmed))?;

        PLAUSIBLE_YEARS
            .contains(&parsed.year())
            .then(|| canonical_timestamp(parsed))
    }

    /// Finds the first date in free text that also survives [`DateParser::parse`].
    ///
    /// Patterns are tried in order; within a pattern every match is tried in
    /// document order.
    pub fn extract_from_text(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        TEXT_PATTERNS.iter().find_map(|pattern| {
            pattern
                .find_iter(text)
                .find_map(|found| self.parse(found.as_str()))
        })
    }
}

fn parse_direct(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.naive_utc());
    }
    if let Some(parsed) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(parsed.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_localized(text: &str) -> Option<NaiveDateTime> {
    let english = translate_months(text);
    parse_direct(&english).or_else(|| reconstruct(&english))
}

/// Strips year markers ("2023 г.") and replaces Russian month names.
fn translate_months(text: &str) -> String {
    let without_markers = YEAR_MARKER.replace_all(text, "$1 ");
    let translated = RU_MONTH.replace_all(&without_markers, |caps: &Captures| {
        let month = caps[0].to_lowercase();
        RU_MONTHS
            .iter()
            .find(|(ru, _)| *ru == month)
            .map_or_else(|| caps[0].to_string(), |(_, en)| (*en).to_string())
    });

    collapse_whitespace(&translated)
}

fn reconstruct(text: &str) -> Option<NaiveDateTime> {
    let caps = LOOSE_DATE.captures(text)?;
    let day = &caps[1];
    let month = &caps[2];
    let year = &caps[3];

    match caps.get(4) {
        Some(time) => NaiveDateTime::parse_from_str(
            &format!("{month} {day}, {year} {}", time.as_str()),
            "%B %d, %Y %H:%M",
        )
        .ok(),
        None => NaiveDate::parse_from_str(&format!("{month} {day}, {year}"), "%B %d, %Y")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
    }
}
