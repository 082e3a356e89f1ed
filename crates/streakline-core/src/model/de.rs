//! Lenient deserializers for records written by the storage collaborator.
//!
//! Stored JSON comes from a dynamically typed front end: ids may be numbers,
//! timestamps may be floats or strings, and any field may be `null`. These
//! helpers map all of that onto sane zero values instead of failing the
//! whole collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` becomes `T::default()`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Epoch milliseconds from an integer, float, or numeric string.
/// Anything else, including non-finite floats, reads as 0.
pub fn millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_millis(&Value::deserialize(deserializer)?).unwrap_or(0))
}

/// Non-negative counter; negatives and garbage read as 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = value_to_millis(&value).unwrap_or(0);
    Ok(u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}

/// String from a string or number; `null` reads as empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional string from a string or number; `null` and `""` read as `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).filter(|s| !s.is_empty()))
}

/// Instant from an RFC 3339 string or epoch milliseconds.
pub fn opt_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let instant = match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| value_to_millis(&value).and_then(DateTime::from_timestamp_millis)),
        Value::Number(_) => value_to_millis(&value).and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    Ok(instant)
}

fn value_to_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
