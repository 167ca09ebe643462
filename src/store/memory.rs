use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{Entity, Repository};
use crate::error::StoreError;

/// In-memory [`Repository`] keyed by entity id.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    entries: RwLock<BTreeMap<String, E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(BTreeMap::new()) }
    }

    /// Snapshot of every stored entity, ordered by id.
    pub fn all(&self) -> Result<Vec<E>, StoreError> {
        let entries =
            self.entries.read().map_err(|_| StoreError::Poisoned { collection: E::COLLECTION })?;
        Ok(entries.values().cloned().collect())
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> FromIterator<E> for MemoryRepository<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|e| (e.id().to_string(), e)).collect();
        Self { entries: RwLock::new(entries) }
    }
}

impl<E: Entity> Repository<E> for MemoryRepository<E> {
    fn save(&self, entity: &E) -> Result<(), StoreError> {
        let mut entries =
            self.entries.write().map_err(|_| StoreError::Poisoned { collection: E::COLLECTION })?;
        entries.insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        let entries =
            self.entries.read().map_err(|_| StoreError::Poisoned { collection: E::COLLECTION })?;
        Ok(entries.get(id).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let entries =
            self.entries.read().map_err(|_| StoreError::Poisoned { collection: E::COLLECTION })?;
        Ok(entries.len())
    }
}
