//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC timestamp as an RFC 3339 / ISO 8601 string
///
/// Millisecond precision with a `Z` suffix, the format submission
/// timestamps are stored in.
pub fn now_iso8601() -> String {
    now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert milliseconds to duration
pub fn millis_to_duration(millis: u64) -> std::time::Duration {
    std::time::Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_now_iso8601_round_trips() {
        let text = now_iso8601();
        let parsed = DateTime::parse_from_rfc3339(&text).expect("valid RFC 3339");
        assert!(text.ends_with('Z'));
        assert!(parsed.timestamp() > 946_684_800);
    }

    #[test]
    fn test_millis_to_duration() {
        assert_eq!(millis_to_duration(0), Duration::from_millis(0));
        assert_eq!(millis_to_duration(1000), Duration::from_secs(1));
        assert_eq!(millis_to_duration(1500).as_millis(), 1500);
    }
}
