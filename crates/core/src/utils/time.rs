//! Relative timestamps ("3 minutes ago") for the replication table.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Humanized distance between `timestamp` and `now`.
pub fn from_now(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp).num_seconds();
    let phrase = humanize(delta.abs());
    if delta < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// `-` when the hub has not reported a time yet.
pub fn format_relative(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    timestamp
        .map(|ts| from_now(ts, now))
        .unwrap_or_else(|| "-".to_string())
}

fn rounded(seconds: i64, unit: i64) -> i64 {
    (seconds + unit / 2) / unit
}

fn humanize(seconds: i64) -> String {
    match seconds {
        s if s < 45 => "a few seconds".to_string(),
        s if s < 90 => "a minute".to_string(),
        s if s < 45 * MINUTE => format!("{} minutes", rounded(s, MINUTE)),
        s if s < 90 * MINUTE => "an hour".to_string(),
        s if s < 22 * HOUR => format!("{} hours", rounded(s, HOUR)),
        s if s < 36 * HOUR => "a day".to_string(),
        s if s < 26 * DAY => format!("{} days", rounded(s, DAY)),
        s if s < 45 * DAY => "a month".to_string(),
        s if s < 320 * DAY => format!("{} months", rounded(s, 30 * DAY)),
        s if s < 548 * DAY => "a year".to_string(),
        s => format!("{} years", rounded(s, 365 * DAY)),
    }
}
