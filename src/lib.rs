//! Open Library Loader - Load Open Library author and work dumps into a keyed store
//!
//! The dumps are tab-separated text files whose last column is a JSON record. This library
//! supports:
//!
//! - Extracting the embedded record from each dump line
//! - Mapping loosely-typed author and work records into [`Author`] and [`Book`] entities
//! - Resolving a work's author ids into display names against already-loaded authors
//! - Running both passes with per-line failure reporting, optionally in parallel
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use openlibrary_loader::{FileStore, IngestOptions, load_author_dump, load_work_dump};
//!
//! let store = FileStore::open(Path::new("/var/lib/openlibrary"))?;
//! let options = IngestOptions::default();
//! let authors = load_author_dump(Path::new("ol_dump_authors.txt"), store.authors(), &options)?;
//! let works =
//!     load_work_dump(Path::new("ol_dump_works.txt"), store.authors(), store.books(), &options)?;
//! println!("{authors}\n{works}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod error;
pub mod ingest;
pub mod mapping;
pub mod models;
pub mod parsers;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::{IngestError, MapError, RecordError, StoreError};
pub use ingest::{
    IngestOptions, PhaseReport, load_author_dump, load_authors, load_work_dump, load_works,
};
pub use mapping::{DatePolicy, UNKNOWN_AUTHOR, map_author, map_work};
pub use models::{Author, Book};
pub use parsers::{DumpReader, extract_record};
pub use store::{FileStore, MemoryRepository, Repository};
