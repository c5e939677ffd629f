//! Observation date parsing and ordering.
//!
//! Series dates are ISO `YYYY-MM-DD` strings, except quarterly series which
//! may use fiscal-quarter labels such as `2024-Q3`. A quarter label maps to
//! the 15th of its middle month so it falls inside the quarter.

use chrono::NaiveDate;
use research_core::{Cadence, DateParseError};
use std::borrow::Cow;

/// Parses an observation date for a series of the given cadence.
///
/// Quarterly series accept `YYYY-Qn` (mapped to the middle of the quarter);
/// every cadence accepts `YYYY-MM-DD`.
pub fn parse_date(date: &str, cadence: Cadence) -> Result<NaiveDate, DateParseError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(DateParseError::Empty);
    }

    if cadence == Cadence::Quarterly && date.contains('Q') {
        let (year, quarter) =
            quarter_parts(date).ok_or_else(|| DateParseError::InvalidQuarter(date.to_string()))?;
        let month = (quarter - 1) * 3 + 2;
        return NaiveDate::from_ymd_opt(year, month, 15)
            .ok_or_else(|| DateParseError::InvalidQuarter(date.to_string()));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DateParseError::InvalidDate(date.to_string()))
}

/// Sort key that orders quarter labels chronologically.
///
/// `YYYY-Qn` becomes `YYYYn`; any other string is used as is.
#[must_use]
pub fn chronological_key(date: &str) -> Cow<'_, str> {
    match quarter_parts(date) {
        Some((year, quarter)) => Cow::Owned(format!("{year:04}{quarter}")),
        None => Cow::Borrowed(date),
    }
}

/// Splits a `YYYY-Qn` label into year and quarter (1-4).
fn quarter_parts(date: &str) -> Option<(i32, u32)> {
    let (year, quarter) = date.trim().split_once('Q')?;
    let year = year.trim_end_matches('-');
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let quarter: u32 = quarter.parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }
    Some((year.parse().ok()?, quarter))
}
