//! Relative time labels for chat messages.

use chrono::{DateTime, Local, Utc};

use crate::domain::Timestamp;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Label rendered for a timestamp that does not parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Format `timestamp` relative to `now`.
///
/// Boundaries are half-open: under a minute is `"Just now"`, under an hour
/// `"Nm ago"`, under a day `"Nh ago"`, anything older the local calendar date
/// as `M/D/YYYY`. A timestamp in the future has a negative difference and
/// therefore reads `"Just now"`.
#[must_use]
pub fn format_time_at(timestamp: &Timestamp, now: DateTime<Utc>) -> String {
    let Some(date) = timestamp.to_datetime() else {
        return INVALID_DATE.to_string();
    };
    let diff = (now - date).num_milliseconds();

    if diff < MINUTE_MS {
        return "Just now".to_string();
    }
    if diff < HOUR_MS {
        return format!("{}m ago", diff / MINUTE_MS);
    }
    if diff < DAY_MS {
        return format!("{}h ago", diff / HOUR_MS);
    }

    date.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

/// Format `timestamp` relative to the current time.
#[must_use]
pub fn format_time(timestamp: &Timestamp) -> String {
    format_time_at(timestamp, Utc::now())
}
