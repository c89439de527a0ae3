//! # Time Utilities
//!
//! Utilities for time formatting and manipulation using chrono.

use chrono::{DateTime, Utc};

/// Parse RFC3339 string to UTC DateTime.
pub fn parse_utc(moment: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(moment)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::FailToDateParse(moment.to_string()))
}

/// Calendar date (`YYYY-MM-DD`) of an RFC3339 timestamp, or the input unchanged
/// when it does not parse.
pub fn format_date(moment: &str) -> String {
    parse_utc(moment)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| moment.to_string())
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_date() {
        let dt = parse_utc("2024-05-01T23:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T21:30:00+00:00");
        assert!(parse_utc("01/05/2024").is_err());
        assert_eq!(format_date("2024-05-01T23:30:00Z"), "2024-05-01");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
