use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use log::warn;
use serde_json::{Map, Value};

use super::resolver::resolve_author_names;
use super::{AUTHOR_KEY_PREFIX, WORK_KEY_PREFIX, strip_key_prefix};
use crate::error::{MapError, RecordError};
use crate::models::{Author, Book, RawWork};
use crate::parsers::deserializers::value_to_string;
use crate::store::Repository;

/// Timestamp format of `created.value`, e.g. `2009-12-11T01:57:19.964652`.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// What to do with a work whose `created.value` cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DatePolicy {
    /// Reject the whole record and report it.
    #[default]
    Drop,
    /// Persist the record with no published date.
    Keep,
}

/// Parse a dump creation timestamp, keeping only the date.
pub fn parse_created(value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|timestamp| timestamp.date())
        .map_err(|_| RecordError::DateParse { value: value.to_string() })
}

/// Convert one extracted work object into a [`Book`].
///
/// `key` is the only required field. When the record lists authors, their names are resolved
/// against `authors` in a single pass over the id list; otherwise the store is not touched.
pub fn map_work<A>(
    record: Map<String, Value>,
    authors: &A,
    date_policy: DatePolicy,
) -> Result<Book, MapError>
where
    A: Repository<Author> + ?Sized,
{
    let raw: RawWork = serde_json::from_value(Value::Object(record))
        .map_err(|e| RecordError::Parse { message: e.to_string() })?;

    let key = raw.key.ok_or_else(|| RecordError::RequiredFieldMissing { field: "key".into() })?;
    let id = strip_key_prefix(&key, WORK_KEY_PREFIX).to_string();

    let published_date = match raw.created.and_then(|created| created.value) {
        None => None,
        Some(value) => match (parse_created(&value), date_policy) {
            (Ok(date), _) => Some(date),
            (Err(e), DatePolicy::Drop) => return Err(e.into()),
            (Err(e), DatePolicy::Keep) => {
                warn!("Work {id}: {e}, keeping record without a published date");
                None
            }
        },
    };

    let author_ids = match raw.authors {
        Some(roles) => author_ids_from_roles(&roles)?,
        None => Vec::new(),
    };
    let author_names = if author_ids.is_empty() {
        Vec::new()
    } else {
        resolve_author_names(&author_ids, authors)
            .map_err(|source| MapError::Store { id: id.clone(), source })?
    };

    Ok(Book {
        id,
        name: raw.title.unwrap_or_default(),
        description: raw.description.map(|description| description.value.unwrap_or_default()),
        published_date,
        cover_ids: raw.covers.unwrap_or_default(),
        author_ids,
        author_names,
    })
}

/// Pull `author.key` out of each author role, in order.
fn author_ids_from_roles(roles: &[Value]) -> Result<Vec<String>, RecordError> {
    roles
        .iter()
        .enumerate()
        .map(|(index, role)| {
            role.pointer("/author/key")
                .and_then(value_to_string)
                .map(|key| strip_key_prefix(&key, AUTHOR_KEY_PREFIX).to_string())
                .ok_or_else(|| RecordError::RequiredFieldMissing {
                    field: format!("authors[{index}].author.key"),
                })
        })
        .collect()
}
