//! Data received from the server and rendered by the controller.
//!
//! Nothing here is persisted or mutated locally; values live only as long as
//! it takes to turn them into markup.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A job posting as delivered by the feed endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    /// Numeric job identifier.
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    /// Skill tags, in display order.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// One page of the job feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedPage {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// A chat message pushed over the real-time channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub content: String,
    pub timestamp: Timestamp,
    /// Whether the current user sent this message.
    #[serde(default)]
    pub is_sender: bool,
}

/// Message timestamp in one of the shapes the server emits.
///
/// The server serializes `datetime.isoformat()` (naive, UTC), but RFC 3339
/// strings and epoch milliseconds are accepted as well. Milliseconds may be
/// fractional (`time.time() * 1000`); the fraction is truncated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(f64),
    /// ISO-8601 / RFC 3339 text.
    Text(String),
}

impl Timestamp {
    /// Resolve to an instant, or `None` if the value is not a valid date.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => millis_to_datetime(*ms),
            Self::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn millis_to_datetime(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    // Saturating cast; out-of-range values are rejected by chrono.
    Utc.timestamp_millis_opt(ms.trunc() as i64).single()
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offset times without seconds: 2024-03-01T12:30Z, 2024-03-01T12:30+02:00
    let zoned = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive ISO-8601 without offset is read as UTC.
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive))
}
