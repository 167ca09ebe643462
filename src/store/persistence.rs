//! File-backed store: load on open, atomic writes on flush

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use super::metadata::StoreManifest;
use super::{Entity, Repository};
use crate::error::StoreError;
use crate::models::{Author, Book};

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write a file atomically (temp file + rename), streaming content through `write`
pub(crate) fn write_atomic_with<F>(path: &Path, write: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>, &Path) -> Result<(), StoreError>,
{
    let temp = temp_path(path);
    let temp_err = |source| StoreError::Write { path: temp.clone(), source };

    let file = File::create(&temp).map_err(temp_err)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, &temp)?;
    writer.flush().map_err(temp_err)?;
    writer.get_ref().sync_all().map_err(temp_err)?;

    fs::rename(&temp, path)
        .map_err(|source| StoreError::Write { path: path.to_path_buf(), source })
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    write_atomic_with(path, |writer, temp| {
        writer
            .write_all(bytes)
            .map_err(|source| StoreError::Write { path: temp.to_path_buf(), source })
    })
}

/// A collection stored as one JSON record per line in `<store_dir>/<collection>.jsonl`.
///
/// The whole collection is held in memory; `save` only touches memory and `flush` rewrites the
/// file and the manifest entry.
pub struct JsonlRepository<E> {
    store_dir: PathBuf,
    path: PathBuf,
    entries: RwLock<BTreeMap<String, E>>,
    dirty: AtomicBool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonlRepository<E> {
    /// Open the collection inside `store_dir`, loading any existing records
    pub fn open(store_dir: &Path) -> Result<Self, StoreError> {
        let path = store_dir.join(format!("{}.jsonl", E::COLLECTION));
        let entries = Self::load(&path)?;
        debug!("Opened {} with {} records", path.display(), entries.len());

        Ok(Self {
            store_dir: store_dir.to_path_buf(),
            path,
            entries: RwLock::new(entries),
            dirty: AtomicBool::new(false),
            _entity: PhantomData,
        })
    }

    fn load(path: &Path) -> Result<BTreeMap<String, E>, StoreError> {
        let mut entries = BTreeMap::new();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(entries),
            Err(source) => return Err(StoreError::Read { path: path.to_path_buf(), source }),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;
            if line.trim().is_empty() {
                continue;
            }
            let entity: E = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
            entries.insert(entity.id().to_string(), entity);
        }

        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn poisoned() -> StoreError {
        StoreError::Poisoned { collection: E::COLLECTION }
    }
}

impl<E: Entity> Repository<E> for JsonlRepository<E> {
    fn save(&self, entity: &E) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(entity.id().to_string(), entity.clone());
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(id).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.len())
    }

    fn flush(&self) -> Result<(), StoreError> {
        if !self.dirty.load(Ordering::Acquire) {
            return Ok(());
        }

        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        write_atomic_with(&self.path, |writer, temp| {
            for (id, entity) in entries.iter() {
                let line = serde_json::to_string(entity)
                    .map_err(|source| StoreError::Serialize { id: id.clone(), source })?;
                writeln!(writer, "{line}")
                    .map_err(|source| StoreError::Write { path: temp.to_path_buf(), source })?;
            }
            Ok(())
        })?;

        let mut manifest = StoreManifest::load(&self.store_dir)?.unwrap_or_default();
        manifest.record(E::COLLECTION, entries.len());
        manifest.save(&self.store_dir)?;

        self.dirty.store(false, Ordering::Release);
        debug!("Flushed {} records to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// The on-disk store used by the binary: an author and a book collection sharing a directory.
pub struct FileStore {
    dir: PathBuf,
    authors: JsonlRepository<Author>,
    books: JsonlRepository<Book>,
}

impl FileStore {
    /// Open (creating if needed) the store directory
    ///
    /// Fails if the directory holds a manifest from an incompatible store version.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)
            .map_err(|source| StoreError::Write { path: dir.to_path_buf(), source })?;
        StoreManifest::load(dir)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            authors: JsonlRepository::open(dir)?,
            books: JsonlRepository::open(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn authors(&self) -> &JsonlRepository<Author> {
        &self.authors
    }

    pub fn books(&self) -> &JsonlRepository<Book> {
        &self.books
    }

    pub fn manifest(&self) -> Result<Option<StoreManifest>, StoreError> {
        StoreManifest::load(&self.dir)
    }
}
