//! Line-level parsing of Open Library style dumps
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: A line without an embedded `{`, or with invalid JSON after
//!   it, produces a [`RecordError`](crate::error::RecordError). The caller records it against
//!   the line number and moves on.
//!
//! - **Lenient fields**: Field-level type mismatches never fail a line. The deserializers in
//!   [`deserializers`] coerce scalars to strings and treat wrongly-shaped containers as absent.
//!
//! - **I/O errors**: Failing to open or read the dump is not a line problem and is returned as
//!   an [`IngestError`](crate::error::IngestError), which stops the phase.

pub mod deserializers;
pub mod extract;

pub use extract::{DumpLine, DumpReader, extract_record};
