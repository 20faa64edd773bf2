//! Small functions exposed to HTML templates.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

// Integer helpers wrap on overflow instead of aborting a page render.

pub fn inc(i: i64) -> i64 {
    i.wrapping_add(1)
}

pub fn multiply(x: i64, y: i64) -> i64 {
    x.wrapping_mul(y)
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// JSON text for embedding a value in a `<script>` block. Values that cannot
/// be serialized become `null`.
pub fn marshal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        tracing::warn!("cannot marshal template value: {err}");
        "null".to_owned()
    })
}

/// `2006-01-02 15:04:05 MST` style timestamp.
pub fn format_time_rfc822<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

enum Phrase {
    Now,
    Fixed(&'static str),
    Count(&'static str, i64),
}

// (exclusive upper bound in seconds, phrase)
const MAGNITUDES: &[(i64, Phrase)] = &[
    (1, Phrase::Now),
    (2, Phrase::Fixed("1 second")),
    (MINUTE, Phrase::Count("seconds", 1)),
    (2 * MINUTE, Phrase::Fixed("1 minute")),
    (HOUR, Phrase::Count("minutes", MINUTE)),
    (2 * HOUR, Phrase::Fixed("1 hour")),
    (DAY, Phrase::Count("hours", HOUR)),
    (2 * DAY, Phrase::Fixed("1 day")),
    (WEEK, Phrase::Count("days", DAY)),
    (2 * WEEK, Phrase::Fixed("1 week")),
    (MONTH, Phrase::Count("weeks", WEEK)),
    (2 * MONTH, Phrase::Fixed("1 month")),
    (YEAR, Phrase::Count("months", MONTH)),
    (18 * MONTH, Phrase::Fixed("1 year")),
    (2 * YEAR, Phrase::Fixed("2 years")),
    (LONG_TIME, Phrase::Count("years", YEAR)),
];

/// Relative time such as `3 minutes ago` or `2 days from now`.
pub fn humanize_time<Tz: TimeZone, Tz2: TimeZone>(
    then: &DateTime<Tz>,
    now: &DateTime<Tz2>,
) -> String {
    let delta = now.clone().signed_duration_since(then.clone()).num_seconds();
    let label = if delta >= 0 { "ago" } else { "from now" };
    let secs = delta.saturating_abs();

    match MAGNITUDES.iter().find(|(limit, _)| secs < *limit) {
        Some((_, Phrase::Now)) => "now".to_owned(),
        Some((_, Phrase::Fixed(text))) => format!("{text} {label}"),
        Some((_, Phrase::Count(unit, divisor))) => {
            format!("{} {unit} {label}", secs / divisor)
        }
        None => format!("a long while {label}"),
    }
}
