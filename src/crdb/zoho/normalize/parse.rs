//! Lenient parsers for statement cell text.
//!
//! Both parsers absorb malformed input instead of failing: amounts degrade to
//! `0.0` and dates to an empty string, so one messy cell never costs the
//! whole statement.

use chrono::{Datelike, Local, NaiveDate};

/// Output format for parsed dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first layouts, tried in order. Two-digit year layouts precede their
/// four-digit siblings because `%Y` happily reads `23` as the year 23.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%d/%b/%y",
    "%d/%b/%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %y",
    "%d %b %Y",
    "%d-%B-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Month-first layouts for numeric dates that are impossible day-first,
/// e.g. `02/13/2023`.
const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%m.%d.%y",
    "%m.%d.%Y",
];

/// Parses an amount cell.
///
/// Spaces (including non-breaking ones), thousands separators, digit-group
/// underscores and any `USD` marker are removed before parsing. Empty or unparseable text yields `0.0`.
/// The sign of the parsed value is preserved.
pub fn parse_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '\u{a0}' | ' ' | ',' | '_'))
        .collect();
    cleaned.replace("USD", "").parse::<f64>().unwrap_or(0.0)
}

/// Parses a date cell into a calendar date, resolving ambiguous numeric
/// dates day-first. A trailing time of day is ignored. Two-digit years are
/// placed in the century that keeps them within 50 years of today.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_relative_to(value, Local::now().year())
}

/// Same as [`parse_date`], with two-digit years resolved against
/// `current_year` instead of today.
pub fn parse_date_relative_to(value: &str, current_year: i32) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = strip_time_of_day(trimmed);
    DAY_FIRST_FORMATS
        .iter()
        .chain(MONTH_FIRST_FORMATS)
        .find_map(|format| {
            let date = NaiveDate::parse_from_str(date_part, format).ok()?;
            if format.contains("%y") {
                resolve_century(date, current_year)
            } else {
                Some(date)
            }
        })
}

/// Parses a date cell into `YYYY-MM-DD`, or an empty string when the cell is
/// blank or not a recognisable date.
pub fn parse_date_str(value: &str) -> String {
    parse_date(value)
        .map(|date| date.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Moves a two-digit-year date into the century closest to `current_year`.
fn resolve_century(date: NaiveDate, current_year: i32) -> Option<NaiveDate> {
    let mut year = current_year - current_year.rem_euclid(100) + date.year().rem_euclid(100);
    if year >= current_year + 50 {
        year -= 100;
    } else if year < current_year - 50 {
        year += 100;
    }
    date.with_year(year)
}

fn strip_time_of_day(value: &str) -> &str {
    match value.rsplit_once([' ', 'T']) {
        Some((date, time)) if looks_like_time(time) => date.trim_end(),
        _ => value,
    }
}

fn looks_like_time(text: &str) -> bool {
    text.contains(':')
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ':' | '.'))
}
