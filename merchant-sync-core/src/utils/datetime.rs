//! Datetime serialization/deserialization helpers.
//!
//! Account timestamps are written as RFC3339 strings. Reading also accepts
//! Unix timestamps, which older admin exports carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Writes the timestamp as RFC3339.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Reads RFC3339 text or a Unix timestamp (seconds or milliseconds).
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unix(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        Raw::Unix(ts) => from_unix(ts).ok_or_else(|| Error::custom("Invalid Unix timestamp")),
    }
}

fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    // past 10^11 the value can only be milliseconds
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
