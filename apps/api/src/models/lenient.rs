//! Forgiving field decoders for persisted history.
//!
//! History may have been written by older clients, so a field that is null or of the
//! wrong type decodes to its default instead of failing the entry (and with it the
//! whole log).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// The field's value, or `T::default()` when it does not decode.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// The array elements that decode. A non-array yields an empty list.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Any JSON number, rounded and clamped to 0..=100. Zero for non-numbers.
pub fn score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_score(deserializer)?.unwrap_or_default())
}

/// Like `score`, but a non-number reads as absent.
pub fn optional_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u32))
}

/// Timestamps as ISO-8601 UTC with exactly three fractional digits
/// (`2023-11-14T22:13:20.000Z`).
///
/// Reads any RFC 3339 string or epoch milliseconds; anything else is the epoch.
pub mod iso_millis {
    use super::*;

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Value::deserialize(deserializer)? {
            Value::String(raw) => DateTime::parse_from_rfc3339(&raw)
                .ok()
                .map(|at| at.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        };
        Ok(parsed.unwrap_or_default())
    }
}
