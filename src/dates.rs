//! Date resolution and campaign progress computation.
//!
//! Dates travel as plain `YYYY-MM-DD` strings on the campaign record; an
//! empty string means "no date set". Resolution never fails: any input that
//! cannot be interpreted produces an empty result for the caller to treat as
//! unset.

use chrono::{Duration, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve a date input into a `YYYY-MM-DD` string, or `""` when unset.
///
/// `kind == "exact"` returns the trimmed literal. Otherwise the value is
/// `"<unit>:<n>"`, or a bare integer when `kind` itself names a unit
/// (`days`, `weeks`, `months`); the result is today plus n units. Months
/// count as 30-day blocks.
pub fn resolve_date_input(kind: &str, value: &str) -> String {
    resolve_date_input_from(kind, value, Local::now().date_naive())
}

/// Same as [`resolve_date_input`] with an explicit reference date.
pub fn resolve_date_input_from(kind: &str, value: &str, today: NaiveDate) -> String {
    if kind.is_empty() {
        return String::new();
    }
    if kind == "exact" {
        return value.trim().to_string();
    }
    let (unit, count) = match value.split_once(':') {
        Some((unit, count)) => (unit.trim(), count.trim()),
        None => (kind, value.trim()),
    };
    let Ok(count) = count.parse::<i64>() else {
        return String::new();
    };
    date_from_offset(unit, count, today)
}

fn date_from_offset(unit: &str, count: i64, today: NaiveDate) -> String {
    let days = match unit {
        "days" => count,
        "weeks" => count * 7,
        // 30-day blocks
        "months" => count * 30,
        _ => return String::new(),
    };
    match today.checked_add_signed(Duration::days(days)) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Completion percentage for `today` within `[start, end]`.
///
/// `None` when either date is missing or unparseable, or when the range is
/// inverted or empty; callers leave the stored percentage untouched in that
/// case. Otherwise the elapsed fraction is clamped to `[0, 1]` and truncated
/// to an integer percentage.
pub fn progress_between(start: &str, end: &str, today: NaiveDate) -> Option<u8> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end <= start {
        return None;
    }
    let total = (end - start).num_days();
    let elapsed = (today - start).num_days().clamp(0, total);
    Some((elapsed * 100 / total) as u8)
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod tests;
