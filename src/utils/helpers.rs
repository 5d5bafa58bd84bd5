//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Round a value to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Collapse an empty or whitespace-only string into `None`
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Deserialize a free-form text field that clients may send as a string or a number
///
/// `null` and a missing field both become an empty string.
pub fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_optional_string(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional text field that clients may send as a string or a number
pub fn loose_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a string or number, got {}", other))),
    }
}

/// Deserialize an optional integer that clients may send as a number or a numeric string
///
/// Empty strings are treated as missing. Floats without a fractional part,
/// such as `4.0`, are accepted.
pub fn loose_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected an integer, got \"{}\"", s))),
        Some(other) => Err(de::Error::custom(format!("expected an integer, got {}", other))),
    }
}

/// Parse an integer id passed as a query string parameter
pub fn parse_id_param(name: &str, value: &str) -> Option<Result<i64, String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<i64>()
            .map_err(|_| format!("Invalid {}: {}", name, value)),
    )
}
