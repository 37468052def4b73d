use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from `start` to `end`, rounded toward negative infinity.
pub fn whole_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Parse a persisted timestamp cell. Returns `None` for anything unrecognized.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    // "2024-01-02 03:04:05+00:00", as written by spreadsheet tools
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Naive date-time, assumed UTC
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // YYYY-MM-DD
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn whole_days_truncates_partial_days() {
        let start = at("2024-03-01T00:00:00Z");
        assert_eq!(whole_days(start, start + Duration::days(5)), 5);
        assert_eq!(whole_days(start, start + Duration::hours(23) + Duration::minutes(59)), 0);
        assert_eq!(whole_days(start, start + Duration::hours(49)), 2);
    }

    #[test]
    fn whole_days_floors_negative_spans() {
        let start = at("2024-03-02T00:00:00Z");
        assert_eq!(whole_days(start, start - Duration::hours(1)), -1);
    }

    #[test]
    fn parse_timestamp_accepts_common_forms() {
        let expected = at("2024-01-02T03:04:05Z");
        assert_eq!(parse_timestamp("2024-01-02T03:04:05Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T04:04:05+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02 03:04:05+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T03:04:05"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02 03:04:05"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02"), Some(at("2024-01-02T00:00:00Z")));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }
}
