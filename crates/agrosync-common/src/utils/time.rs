use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: i64 = 86_400;

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

pub fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Whole days elapsed between two Unix-second timestamps, truncated toward
/// zero. Partial days do not count; an `end` before `start` counts as zero.
pub fn whole_days_between(start: i64, end: i64) -> i64 {
    ((end - start).max(0)) / SECONDS_PER_DAY
}

pub fn format_timestamp(timestamp: i64) -> String {
    let datetime = chrono::DateTime::<chrono::Utc>::from_timestamp(timestamp, 0).unwrap_or_default();
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_functions() {
        let now = current_timestamp();
        assert!(now > 0);

        let formatted = format_timestamp(now);
        assert!(!formatted.is_empty());

        let millis = current_timestamp_millis();
        assert!(millis / 1000 >= now);
    }

    #[test]
    fn whole_days_truncate_partial_days() {
        let start = 1_700_000_000;
        assert_eq!(whole_days_between(start, start), 0);
        assert_eq!(whole_days_between(start, start + SECONDS_PER_DAY - 1), 0);
        assert_eq!(whole_days_between(start, start + SECONDS_PER_DAY), 1);
        assert_eq!(whole_days_between(start, start + 100 * SECONDS_PER_DAY + 3600), 100);
    }

    #[test]
    fn whole_days_never_negative() {
        let start = 1_700_000_000;
        assert_eq!(whole_days_between(start, start - SECONDS_PER_DAY), 0);
    }
}
