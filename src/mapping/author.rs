use serde_json::{Map, Value};

use super::{AUTHOR_KEY_PREFIX, strip_key_prefix};
use crate::error::RecordError;
use crate::models::{Author, RawAuthor};

/// Convert one extracted author object into an [`Author`].
///
/// Nothing is required: a missing `key` yields an empty id, and missing names become empty
/// strings.
pub fn map_author(record: Map<String, Value>) -> Result<Author, RecordError> {
    let raw: RawAuthor = serde_json::from_value(Value::Object(record))
        .map_err(|e| RecordError::Parse { message: e.to_string() })?;

    let id = raw
        .key
        .as_deref()
        .map(|key| strip_key_prefix(key, AUTHOR_KEY_PREFIX).to_string())
        .unwrap_or_default();

    Ok(Author {
        id,
        name: raw.name.unwrap_or_default(),
        personal_name: raw.personal_name.unwrap_or_default(),
    })
}
