//! Store manifest: schema version and per-collection bookkeeping

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::persistence::write_atomic;
use crate::error::StoreError;

/// Store schema version. Bump when the on-disk record format changes.
pub const STORE_VERSION: u32 = 1;

pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Top-level store manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    pub version: u32,
    pub collections: BTreeMap<String, CollectionMetadata>,
}

/// Metadata for one collection file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub count: usize,
    pub updated_at: DateTime<Utc>,
}

impl Default for StoreManifest {
    fn default() -> Self {
        Self { version: STORE_VERSION, collections: BTreeMap::new() }
    }
}

impl StoreManifest {
    /// Load the manifest from a store directory
    /// Returns None if the directory has never been flushed
    pub fn load(store_dir: &Path) -> Result<Option<Self>, StoreError> {
        let path = store_dir.join(MANIFEST_FILENAME);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let manifest: Self =
            serde_json::from_str(&json).map_err(|source| StoreError::Manifest { path, source })?;
        if manifest.version != STORE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: STORE_VERSION,
                found: manifest.version,
            });
        }

        Ok(Some(manifest))
    }

    /// Write the manifest atomically
    pub fn save(&self, store_dir: &Path) -> Result<(), StoreError> {
        let path = store_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| StoreError::Manifest { path: path.clone(), source })?;
        write_atomic(&path, json.as_bytes())
    }

    /// Record the current size of a collection, stamped with the current time
    pub fn record(&mut self, collection: &str, count: usize) {
        self.collections
            .insert(collection.to_string(), CollectionMetadata { count, updated_at: Utc::now() });
    }

    pub fn collection(&self, collection: &str) -> Option<&CollectionMetadata> {
        self.collections.get(collection)
    }
}
