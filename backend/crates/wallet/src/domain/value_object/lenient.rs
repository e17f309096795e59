//! Lenient numeric fields
//!
//! Upstream sends amounts as decimal strings (`"100.00"`) or numbers, and
//! omits fields freely. Anything missing or unparsable reads as zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decimal amount from a number, a numeric string, or nothing
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map(parse_amount)
        .unwrap_or(0.0))
}

/// Non-negative count from a number, a numeric string, or nothing
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map(parse_count)
        .unwrap_or(0))
}

pub fn count_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    count(deserializer).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// String id from either a string or a number
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

pub fn parse_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|amount| amount.is_finite()).unwrap_or(0.0)
}

pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n > 0.0).map(|n| n as u64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
