//! Raw record shapes as they appear inside dump lines.
//!
//! Every field is optional and deserialized leniently; deciding what is required happens in
//! [`crate::mapping`].

use serde::Deserialize;
use serde_json::Value;

/// A `{ "type": ..., "value": ... }` wrapper, as used by `description` and `created`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextValue {
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub personal_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWork {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_text_value")]
    pub description: Option<TextValue>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_text_object")]
    pub created: Option<TextValue>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_string_list")]
    pub covers: Option<Vec<String>>,
    /// Author role objects, kept untyped; only `author.key` is read from each.
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_array")]
    pub authors: Option<Vec<Value>>,
}
