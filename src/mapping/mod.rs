//! Mapping of raw dump records into [`Author`](crate::models::Author) and
//! [`Book`](crate::models::Book) entities.
//!
//! Mappers take the object produced by [`extract_record`](crate::parsers::extract_record).
//! Work mapping also resolves author ids to display names through a read-only
//! [`Repository`](crate::store::Repository) handle.

pub mod author;
pub mod resolver;
pub mod work;

pub use author::map_author;
pub use resolver::{UNKNOWN_AUTHOR, resolve_author_names};
pub use work::{CREATED_FORMAT, DatePolicy, map_work, parse_created};

pub const AUTHOR_KEY_PREFIX: &str = "/authors/";
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Strip a dump key prefix such as `/authors/`; keys without it are returned unchanged.
pub fn strip_key_prefix<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}
