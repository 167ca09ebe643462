//! Persistence for authors and books
//!
//! The loader only needs two capabilities from a store: upsert by id and lookup by id. Both are
//! expressed by [`Repository`], which is passed explicitly to the orchestrator and the work
//! mapper.
//!
//! Implementations:
//! - [`MemoryRepository`]: in-process map, used by tests and by callers embedding the loader
//! - [`JsonlRepository`]: one JSON record per line in a store directory, written atomically
//!   on [`Repository::flush`], with a shared `manifest.json` describing each collection
//!
//! Store layout (see [`FileStore`]):
//! - `authors.jsonl`
//! - `books.jsonl`
//! - `manifest.json`

pub mod memory;
pub mod metadata;
pub mod persistence;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

pub use memory::MemoryRepository;
pub use metadata::{CollectionMetadata, STORE_VERSION, StoreManifest};
pub use persistence::{FileStore, JsonlRepository};

/// A record that can be kept in a [`Repository`].
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection name, also used for file names and manifest entries.
    const COLLECTION: &'static str;

    /// Primary key.
    fn id(&self) -> &str;
}

/// Keyed entity storage.
///
/// Implementations must give read-after-write consistency to the calling process: a
/// `find_by_id` issued after `save` returns sees the saved value, even before `flush`.
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert or overwrite the entity stored under `entity.id()`.
    fn save(&self, entity: &E) -> Result<(), StoreError>;

    fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Number of stored entities.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Make all saves so far durable.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
