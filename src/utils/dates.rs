//! Date and time utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a concert date. Accepts an ISO day (2024-03-01) or a slashed form
/// (03/01/2024) as some import sources produce.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}

/// Format a timestamp as "YYYY-MM-DD HH:MM:SS"
pub fn format_datetime(timestamp: i64) -> String {
    let dt = DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Convert timestamp to relative time string (e.g., "2 hours ago")
pub fn timestamp_to_relative(timestamp: i64) -> String {
    let dt = DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now);
    chrono_humanize::HumanTime::from(dt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_day(" 03/01/2024 "),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_day("next friday"), None);
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(0), "1970-01-01 00:00:00");
    }
}
