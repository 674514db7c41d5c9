//! Observation date helpers

use chrono::{Duration, NaiveDate};

use crate::StorageError;

/// Format of the `date` column and of dates accepted in request paths
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
///
/// Only the zero-padded form is accepted: the `date` column is compared as
/// text, so `2017-8-1` would not order against it.
pub fn parse_date(value: &str) -> Result<NaiveDate, StorageError> {
    let malformed = || StorageError::MalformedDate(value.to_string());

    if value.len() != 10 || !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| malformed())
}

/// First day of a window of `days` days ending at `latest`.
///
/// Saturates at `NaiveDate::MIN` when the window reaches past the calendar.
pub fn trailing_window_start(latest: NaiveDate, days: u32) -> NaiveDate {
    latest
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
