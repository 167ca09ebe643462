use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::TextValue;

/// Render a scalar JSON value as a string. `null` yields `None`; arrays and objects yield their
/// JSON text.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Custom deserializer that coerces any non-null value into a string
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

/// Custom deserializer for `{ "type": "/type/text", "value": "..." }` wrappers
///
/// Objects yield their `value` sub-field (if any); a bare string is taken as the value itself.
/// Anything else is treated as if the field were absent.
pub fn deserialize_text_value<'de, D>(deserializer: D) -> Result<Option<TextValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(TextValue { value: map.get("value").and_then(value_to_string) }),
        Value::String(s) => Some(TextValue { value: Some(s) }),
        _ => None,
    })
}

/// Custom deserializer for `{ "type": "/type/datetime", "value": "..." }` wrappers
///
/// Only objects are accepted; a bare string or any other shape is treated as absent.
pub fn deserialize_text_object<'de, D>(deserializer: D) -> Result<Option<TextValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(TextValue { value: map.get("value").and_then(value_to_string) }),
        _ => None,
    })
}

/// Custom deserializer for arrays of identifiers that may be numbers or strings
///
/// `null` elements are dropped. A non-array value is treated as absent.
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.iter().filter_map(value_to_string).collect()),
        _ => None,
    })
}

/// Custom deserializer that keeps an array untyped, treating a non-array as absent
pub fn deserialize_array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items),
        _ => None,
    })
}
