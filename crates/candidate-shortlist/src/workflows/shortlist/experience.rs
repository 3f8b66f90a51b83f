use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::domain::{DateField, WorkExperience};

/// Year assumed for open-ended positions unless configured otherwise.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

// `%.f` also matches when the fraction is absent.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const MONTH_NAMES: [&str; 12] = [
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

// Day-less shapes; a day is appended before parsing.
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%m/%Y", "%B %Y"];

/// Sums whole years of work history.
///
/// Open-ended positions run until `reference_year`; a position without a start
/// date is counted from year 0. An entry whose dates cannot be read contributes
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceEstimator {
    reference_year: i32,
}

impl Default for ExperienceEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_YEAR)
    }
}

impl ExperienceEstimator {
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn total_years(&self, entries: &[WorkExperience]) -> u32 {
        entries
            .iter()
            .filter_map(|entry| self.entry_years(entry))
            .fold(0u32, u32::saturating_add)
    }

    fn entry_years(&self, entry: &WorkExperience) -> Option<u32> {
        let start = resolve_year(&entry.start_date, 0)?;
        let end = resolve_year(&entry.end_date, self.reference_year)?;
        Some(end.saturating_sub(start).max(0) as u32)
    }
}

fn resolve_year(field: &DateField, fallback: i32) -> Option<i32> {
    match field {
        DateField::Missing => Some(fallback),
        DateField::Text(raw) if raw.is_empty() => Some(fallback),
        DateField::Text(raw) => parse_year(raw),
        DateField::Unreadable(_) => None,
    }
}

/// Extracts the calendar year from a loosely formatted date string.
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.year());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.year());
        }
    }

    let canonical = canonical_month_names(trimmed);
    let trimmed = canonical.as_str();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.year());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.year());
        }
    }

    let with_day = format!("{trimmed} 1");
    for format in MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, &format!("{format} %d")) {
            return Some(date.year());
        }
    }

    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }

    None
}

/// Rewrites month words such as "Sept." or "SEPTEMBER" to the three letter form
/// chrono reads with `%b`/`%B`.
fn canonical_month_names(raw: &str) -> String {
    if !raw.bytes().any(|b| b.is_ascii_alphabetic()) {
        return raw.to_string();
    }

    raw.split_whitespace()
        .map(|token| {
            let word = token.trim_end_matches(['.', ',']);
            let comma = if token.ends_with(',') { "," } else { "" };
            match month_abbreviation(word) {
                Some(abbreviation) => format!("{abbreviation}{comma}"),
                None => token.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn month_abbreviation(word: &str) -> Option<&'static str> {
    if word.len() < 3 || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let lower = word.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .copied()
        .find(|month| month.starts_with(lower.as_str()))
        .map(|month| &month[..3])
}
