// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Serde adapter for durations written as a raw integer count of nanoseconds.
///
/// Duration literals such as `"10ms"` are rejected here; fields that take
/// literals use `humantime_serde` instead.
pub(crate) mod duration_nanos {
    use super::{Deserialize, Deserializer, Duration};
    use serde::Serializer;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = u64::try_from(value.as_nanos()).map_err(|_| {
            serde::ser::Error::custom(format!(
                "duration {} does not fit in 64-bit nanoseconds",
                humantime::format_duration(*value)
            ))
        })?;
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_nanos(u64::deserialize(deserializer)?))
    }
}

// Support deser into a string from multiple value types. Environment variables
// and unquoted YAML scalars that look like a number or bool arrive typed.
pub(crate) fn deser_into_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    value_into_string(value)
}

// Absent and empty values both decode to None
pub(crate) fn deser_into_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => {
            let s = value_into_string(value)?;
            Ok(if s.is_empty() { None } else { Some(s) })
        }
    }
}

fn value_into_string<E: serde::de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::Number(num) => Ok(num.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::String(s) => Ok(s),
        _ => Err(E::custom("unexpected value for string parameter")),
    }
}

/// Upper-cased environment variable fragment for a component name.
pub(crate) fn env_fragment(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
