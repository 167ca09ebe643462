use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A work as persisted by the loader.
///
/// `author_names[i]` is the display name resolved for `author_ids[i]` at load time. The names
/// are a snapshot and are not refreshed when the author record changes later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Dump key with the `/works/` prefix removed, e.g. `OL1W`.
    pub id: String,
    pub name: String,
    /// `None` when the dump had no `description` at all, which is distinct from an empty one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub cover_ids: Vec<String>,
    #[serde(default)]
    pub author_ids: Vec<String>,
    #[serde(default)]
    pub author_names: Vec<String>,
}

impl Entity for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serializes_without_unset_optionals() {
        let book = Book { id: "OL1W".to_string(), name: "Huck Finn".to_string(), ..Book::default() };

        let json = serde_json::to_string(&book).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("publishedDate"));
        assert!(json.contains(r#""authorIds":[]"#));

        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_book_keeps_empty_description() {
        let book = Book {
            id: "OL2W".to_string(),
            description: Some(String::new()),
            published_date: NaiveDate::from_ymd_opt(2009, 12, 11),
            ..Book::default()
        };

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains(r#""description":"""#));
        assert!(json.contains(r#""publishedDate":"2009-12-11""#));
    }
}
