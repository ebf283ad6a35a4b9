//! Typed access to loosely-typed wire payloads.
//!
//! The sync service speaks JSON. Readers here implement the field rules the
//! record codecs share: an absent or `null` field is simply unset, while a
//! present field of the wrong type is a [`DecodeError::Malformed`].

use crate::{error::Result, DecodeError, UnixSeconds};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One JSON-like payload exchanged with the sync service.
pub type WireValue = Value;

/// A wire object.
pub type WireObject = Map<String, Value>;

/// Human-readable wire type name, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// View a payload as an object, or fail with the field name given.
pub fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a WireObject> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::malformed(field, "object", type_name(value)))
}

fn present<'a>(obj: &'a WireObject, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

pub fn optional_i64(obj: &WireObject, key: &str) -> Result<Option<i64>> {
    match present(obj, key) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| DecodeError::malformed(key, "integer", type_name(v))),
    }
}

pub fn optional_bool(obj: &WireObject, key: &str) -> Result<Option<bool>> {
    match present(obj, key) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| DecodeError::malformed(key, "boolean", type_name(v))),
    }
}

pub fn optional_string(obj: &WireObject, key: &str) -> Result<Option<String>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v) => Err(DecodeError::malformed(key, "string", type_name(v))),
    }
}

pub fn optional_object<'a>(obj: &'a WireObject, key: &str) -> Result<Option<&'a WireObject>> {
    match present(obj, key) {
        None => Ok(None),
        Some(v) => as_object(v, key).map(Some),
    }
}

fn int_seq(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(Value::as_i64).collect()
}

fn string_seq(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}

pub fn optional_int_seq(obj: &WireObject, key: &str) -> Result<Option<Vec<i64>>> {
    match present(obj, key) {
        None => Ok(None),
        Some(v) => int_seq(v)
            .map(Some)
            .ok_or_else(|| DecodeError::malformed(key, "array of integers", type_name(v))),
    }
}

/// Read an id that older clients sent as strings and newer ones as integers.
///
/// Integers are tried first. Failing that, an array of strings is accepted
/// and every numeric element is kept; non-numeric elements are dropped.
/// Any other shape reads as absent, never as an error.
pub fn legacy_int_seq(obj: &WireObject, key: &str) -> Option<Vec<i64>> {
    let value = present(obj, key)?;
    int_seq(value).or_else(|| {
        string_seq(value).map(|items| {
            items
                .into_iter()
                .filter_map(|s| s.parse::<i64>().ok())
                .collect()
        })
    })
}

/// Insert `value` under `key` only when it is present.
pub fn put<T: Into<Value>>(obj: &mut WireObject, key: &str, value: Option<T>) {
    if let Some(value) = value {
        obj.insert(key.to_string(), value.into());
    }
}

/// Convert wire unix seconds to a native time.
///
/// Values outside the representable range read as absent.
pub fn native_time(seconds: Option<UnixSeconds>) -> Option<DateTime<Utc>> {
    seconds.and_then(|s| DateTime::from_timestamp(s, 0))
}
