//! Error types for the loader.
//!
//! Errors come in two tiers:
//!
//! - [`RecordError`] describes why a single dump line was rejected. These never stop a phase;
//!   they are collected into a [`PhaseReport`](crate::ingest::PhaseReport) with their line number.
//! - [`StoreError`] and [`IngestError`] are phase-fatal. A store that cannot persist or read is
//!   not retried, since carrying on would silently lose data.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why one dump line could not be turned into an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line contains no `{`, so there is no embedded record.
    #[error("line contains no embedded JSON object")]
    Extraction,
    /// The embedded text is not a valid JSON object.
    #[error("invalid JSON record: {message}")]
    Parse { message: String },
    /// A record-defining field is absent.
    #[error("required field `{field}` is missing")]
    RequiredFieldMissing { field: String },
    /// `created.value` is present but does not match the dump timestamp format.
    #[error("unparsable creation date `{value}`")]
    DateParse { value: String },
}

impl RecordError {
    /// Short stable label, used when grouping failures in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Extraction => "extraction",
            RecordError::Parse { .. } => "parse",
            RecordError::RequiredFieldMissing { .. } => "required-field",
            RecordError::DateParse { .. } => "date",
        }
    }
}

/// Failures raised by a [`Repository`](crate::store::Repository) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write store file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("corrupt record at {}:{line}: {source}", .path.display())]
    Corrupt { path: PathBuf, line: usize, source: serde_json::Error },
    #[error("failed to serialize record `{id}`: {source}")]
    Serialize { id: String, source: serde_json::Error },
    #[error("invalid store manifest {}: {source}", .path.display())]
    Manifest { path: PathBuf, source: serde_json::Error },
    #[error("store manifest version mismatch (expected {expected}, found {found})")]
    VersionMismatch { expected: u32, found: u32 },
    /// A lock guarding the in-memory collection was poisoned by a panicking writer.
    #[error("store collection `{collection}` is unavailable after a writer panicked")]
    Poisoned { collection: &'static str },
}

/// Outcome of mapping a work record, which may also touch the author store.
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("author lookup failed for work `{id}`: {source}")]
    Store { id: String, source: StoreError },
}

/// Phase-fatal errors. Any of these halts the running phase.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open dump {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read dump at line {line}: {source}")]
    Read { line: usize, source: io::Error },
    #[error("store failure while handling `{id}`: {source}")]
    Store { id: String, source: StoreError },
    #[error("failed to flush store after {phase} phase: {source}")]
    Flush { phase: &'static str, source: StoreError },
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
