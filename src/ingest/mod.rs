//! Ingestion orchestration for author and work dumps.
//!
//! # Error Handling Strategy
//!
//! - **Line-level failures** ([`RecordError`](crate::error::RecordError)) are logged at `warn`,
//!   recorded in the [`PhaseReport`] with their line number, and never stop the phase.
//!
//! - **Store and I/O failures** ([`IngestError`](crate::error::IngestError)) stop the phase
//!   immediately and name the line or record id in flight. They are not retried.
//!
//! - **Durability**: each phase flushes its target repository before returning, so the works
//!   phase always resolves against authors that have been fully persisted.

pub mod pipeline;
pub mod report;

pub use pipeline::{IngestOptions, load_author_dump, load_authors, load_work_dump, load_works};
pub use report::{LineFailure, Phase, PhaseReport};
