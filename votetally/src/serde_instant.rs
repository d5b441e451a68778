// Instants travel as ISO-8601 UTC strings with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
use crate::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render an instant in the wire format
pub fn format_instant(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a client-supplied instant.
///
/// Accepts RFC 3339 (`2025-01-01T10:00:00Z`, any offset), a bare date-time taken as UTC,
/// or a bare date meaning midnight UTC.
pub fn parse_instant(input: &str) -> Option<Instant> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms(0, 0, 0)));
    }
    None
}

// a single-purpose module for use in `#[serde(with)]`
pub mod iso_instant {
    use super::*;

    pub fn serialize<S: Serializer>(instant: &Instant, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_instant(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Instant, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_instant(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid instant: {}", s)))
    }
}
