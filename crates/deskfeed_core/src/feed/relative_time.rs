//! Relative-time labels for feed timestamps.
//!
//! # Invariants
//! - Counts are rounded to the nearest unit; exact halves round down.
//! - Timestamps in the future are labelled like fresh ones.

use chrono::{DateTime, Utc};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;
const CALENDAR_DATE_FORMAT: &str = "%b %-d, %Y";

/// Formats the time elapsed between `timestamp` and `now`.
///
/// Buckets:
/// - under a minute: `moments ago`
/// - under an hour: `N minute(s) ago`
/// - under a day: `N hour(s) ago`
/// - one day: `yesterday`
/// - under a week: `N days ago`
/// - otherwise the calendar date of `timestamp`, e.g. `Mar 5, 2026`
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_seconds().max(0);

    if elapsed < SECS_PER_MINUTE {
        return "moments ago".to_string();
    }
    if elapsed < SECS_PER_HOUR {
        return plural(rounded_units(elapsed, SECS_PER_MINUTE), "minute");
    }
    if elapsed < SECS_PER_DAY {
        return plural(rounded_units(elapsed, SECS_PER_HOUR), "hour");
    }
    if elapsed < DAYS_PER_WEEK * SECS_PER_DAY {
        let days = rounded_units(elapsed, SECS_PER_DAY);
        if days == 1 {
            return "yesterday".to_string();
        }
        return plural(days, "day");
    }

    timestamp.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Rounds `secs / unit` to the nearest integer, resolving exact halves down.
fn rounded_units(secs: i64, unit: i64) -> i64 {
    (2 * secs + unit - 1) / (2 * unit)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::{relative_time, rounded_units};
    use chrono::{Duration, TimeZone, Utc};

    fn label(elapsed: Duration) -> String {
        let now = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
        relative_time(now - elapsed, now)
    }

    #[test]
    fn under_a_minute_is_moments_ago() {
        assert_eq!(label(Duration::seconds(0)), "moments ago");
        assert_eq!(label(Duration::seconds(45)), "moments ago");
        assert_eq!(label(Duration::seconds(59)), "moments ago");
    }

    #[test]
    fn minutes_round_with_halves_down() {
        assert_eq!(label(Duration::seconds(60)), "1 minute ago");
        assert_eq!(label(Duration::seconds(90)), "1 minute ago");
        assert_eq!(label(Duration::seconds(100)), "2 minutes ago");
        assert_eq!(label(Duration::minutes(42)), "42 minutes ago");
    }

    #[test]
    fn hours_round_to_nearest() {
        assert_eq!(label(Duration::minutes(60)), "1 hour ago");
        assert_eq!(label(Duration::minutes(100)), "2 hours ago");
        assert_eq!(label(Duration::hours(5)), "5 hours ago");
    }

    #[test]
    fn one_day_is_yesterday() {
        assert_eq!(label(Duration::hours(24)), "yesterday");
        assert_eq!(label(Duration::hours(25)), "yesterday");
        assert_eq!(label(Duration::hours(36)), "yesterday");
        assert_eq!(label(Duration::hours(37)), "2 days ago");
        assert_eq!(label(Duration::days(3)), "3 days ago");
    }

    #[test]
    fn a_week_or_more_is_a_calendar_date() {
        assert_eq!(label(Duration::days(7)), "Mar 8, 2026");
        assert_eq!(label(Duration::days(10)), "Mar 5, 2026");
    }

    #[test]
    fn future_timestamps_are_moments_ago() {
        let now = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(
            relative_time(now + Duration::hours(3), now),
            "moments ago"
        );
    }

    #[test]
    fn rounded_units_resolves_halves_down() {
        assert_eq!(rounded_units(90, 60), 1);
        assert_eq!(rounded_units(91, 60), 2);
        assert_eq!(rounded_units(149, 60), 2);
        assert_eq!(rounded_units(150, 60), 2);
        assert_eq!(rounded_units(151, 60), 3);
    }
}
