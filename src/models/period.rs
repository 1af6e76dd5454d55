use chrono::{NaiveDate, NaiveDateTime};

use crate::error::LedgerError;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The budget scope key for an instant, e.g. "2024-03".
pub fn month_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

/// The yearly window key for an instant, e.g. "2024".
pub fn year_key(at: NaiveDateTime) -> String {
    at.format("%Y").to_string()
}

/// Validate a user-supplied "YYYY-MM" and return it normalised.
pub fn parse_month(s: &str) -> Result<String, LedgerError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| LedgerError::InvalidMonth(trimmed.to_string()))
}
