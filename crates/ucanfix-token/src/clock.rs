use chrono::{Duration, Utc};

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Unix time `years` 365-day years from now.
pub fn years_from_now(years: i64) -> i64 {
    (Utc::now() + Duration::days(365 * years)).timestamp()
}

/// Unix time `days` days in the past.
pub fn days_ago(days: i64) -> i64 {
    (Utc::now() - Duration::days(days)).timestamp()
}
