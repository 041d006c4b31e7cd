//! Time helpers
//!
//! Persisted timestamps are Unix milliseconds; calendar fields use
//! `chrono::NaiveDate`.

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Unix millis as RFC 3339, for log/debug output
pub fn millis_to_rfc3339(millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_rfc3339() {
        let s = millis_to_rfc3339(0).unwrap();
        assert!(s.starts_with("1970-01-01T00:00:00"));
        assert!(millis_to_rfc3339(i64::MAX).is_none());
    }
}
