// src/models/serde_text.rs
//! Lenient field codecs. Form inputs are text, but the API answers with
//! numbers, nulls and empty strings interchangeably.

use std::fmt::Display;
use std::str::FromStr;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Strings, numbers and booleans as text; `null` as empty text.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).filter(|s| !s.is_empty()))
}

/// Checkbox values: booleans, `"true"`/`"false"`, `1`/`0`. `None` for null
/// or anything unrecognised.
pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let flag = match &value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };
    if flag.is_none() && !value.is_null() {
        warn!("Ignoring unrecognised flag value {}", value);
    }
    Ok(flag)
}

/// Like [`opt_flag`], unset reads as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_flag(deserializer)?.unwrap_or(false))
}

/// A list that may come back as `null`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default())
}

/// Select values: an unpicked select travels as `""`.
pub mod opt_enum {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = value_to_text(Value::deserialize(deserializer)?);
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            // an option the form no longer offers reads as unpicked
            Some(s) => match s.parse() {
                Ok(v) => Ok(Some(v)),
                Err(e) => {
                    warn!("Dropping select value: {}", e);
                    Ok(None)
                }
            },
        }
    }
}
