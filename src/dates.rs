// 📅 Date Parser - Record dates as calendar dates
// Records arrive with dates typed by clerks ("02/15/2025") or stored by the
// application ("2025-02-15"). Both normalize to a chrono NaiveDate.
//
// Invalid input is never an exception: the parser returns None and every
// downstream computation propagates it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::PeriodError;

/// Placeholder rendered wherever a date could not be computed
pub const MISSING_DATE: &str = "—";

/// Generic calendar-date layouts tried when the input has no '/'
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%d %B %Y"];

/// Date-time layouts without an offset; only the calendar date is kept
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// FLEXIBLE PARSING
// ============================================================================

/// Parse a record date written either as `MM/DD/YYYY` or in a generic form
/// (ISO date, RFC 3339 timestamp, "March 5, 2025").
///
/// With slashes the parts are month, day, year. An empty month or day
/// defaults to 1; the year is required. Parts that do not form a real
/// calendar date yield None rather than rolling over into the next month.
pub fn parse_date_flexible(date_str: &str) -> Option<NaiveDate> {
    let input = date_str.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = if input.contains('/') {
        parse_slash_date(input)
    } else {
        parse_generic_date(input)
    };

    if parsed.is_none() {
        debug!(input = %date_str, "unparseable record date");
    }

    parsed
}

/// Strict boundary parser: only the canonical ISO form `YYYY-MM-DD`
pub fn parse_iso_date(date_str: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| PeriodError::invalid_date(date_str))
}

fn parse_slash_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('/').map(str::trim);

    let month = parse_component(parts.next())?;
    let day = parse_component(parts.next())?;
    let year: i32 = parts.next()?.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month/day component; missing or empty means 1
fn parse_component(part: Option<&str>) -> Option<u32> {
    match part {
        None | Some("") => Some(1),
        Some(text) => text.parse().ok(),
    }
}

fn parse_generic_date(input: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return Some(date);
    }

    // Timestamps keep the calendar date as written, whatever the offset
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
}

// ============================================================================
// DISPLAY
// ============================================================================

/// Format as `MM/DD/YYYY`, the layout clerks read on listing pages
pub fn format_mdy(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Display text for a possibly-invalid date ("—" when missing)
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(format_mdy)
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
