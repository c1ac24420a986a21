use chrono::{DateTime, NaiveDateTime, Utc};

// Fixed width so that lexical order matches chronological order.
const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Render an instant in the fixed-width storage form `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

/// Parse the storage form written by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, STORAGE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_storage_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::microseconds(1500);

        assert_eq!(format_timestamp(&whole), "2024-01-01T00:00:00.000000Z");
        assert_eq!(format_timestamp(&fractional), "2024-01-01T00:00:00.001500Z");
        assert!(format_timestamp(&whole) < format_timestamp(&fractional));
    }

    #[test]
    fn test_parse_storage_format() {
        let ts = Utc.with_ymd_and_hms(2023, 6, 30, 12, 34, 56).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));
        assert_eq!(parse_timestamp("not a date"), None);
    }
}
