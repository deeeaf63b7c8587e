//! Lenient field decoders for collector records.
//!
//! Each decoder reads the raw JSON value and maps anything it cannot
//! interpret to the field's empty value. None of them return an error for
//! bad data; only structural deserializer failures propagate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::content::{parse_timestamp, Platform, PublishedDate, SentimentResult};

fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Only called for keys that are present, so an explicit `null` counts as zero.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        None | Some(Value::Null) => Some(0),
        Some(value) => count_from_value(&value),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn count_from_value(value: &Value) -> Option<i64> {
    let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

pub(crate) fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite()))
}

/// Hashtags arrive either as an array or as a JSON-encoded array in a string.
pub(crate) fn hashtags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::Array(values)) => tags_from_values(values),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Array(values)) => tags_from_values(values),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

fn tags_from_values(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

pub(crate) fn platform<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(Platform::from(s)),
        _ => None,
    })
}

/// Present keys always decode to `Some`; only a missing key leaves the date absent.
pub(crate) fn published_date<'de, D>(deserializer: D) -> Result<Option<PublishedDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match raw(deserializer)? {
        Some(Value::String(s)) => PublishedDate::Raw(s),
        Some(other) => PublishedDate::Unusable(other),
        None => PublishedDate::Unusable(Value::Null),
    }))
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

pub(crate) fn sentiment<'de, D>(deserializer: D) -> Result<Option<SentimentResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
