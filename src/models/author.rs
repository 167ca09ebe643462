use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// An author as persisted by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Dump key with the `/authors/` prefix removed, e.g. `OL1A`.
    pub id: String,
    pub name: String,
    pub personal_name: String,
}

impl Entity for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> &str {
        &self.id
    }
}
