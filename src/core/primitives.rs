use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parses a record date: RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` or plain
/// `YYYY-MM-DD`. Timestamps keep their calendar date as written.
#[must_use]
pub fn parse_record_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(local.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Signed whole days from `from` to `to`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{days_between, parse_record_date};

    #[test]
    fn parses_timestamp_and_plain_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert_eq!(parse_record_date(&json!("2025-06-01T00:00:00.000Z")), expected);
        assert_eq!(parse_record_date(&json!("2025-06-01T08:30:00")), expected);
        assert_eq!(parse_record_date(&json!("2025-06-01")), expected);
        assert_eq!(parse_record_date(&json!("June 1st")), None);
        assert_eq!(parse_record_date(&json!(20250601)), None);
    }

    #[test]
    fn day_difference_is_signed() {
        let a = NaiveDate::from_ymd_opt(2025, 3, 1).expect("date");
        let b = NaiveDate::from_ymd_opt(2025, 3, 11).expect("date");
        assert_eq!(days_between(a, b), 10);
        assert_eq!(days_between(b, a), -10);
    }
}
