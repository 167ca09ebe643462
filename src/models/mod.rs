//! Data models for the loader.
//!
//! - [`Author`] and [`Book`] are the persisted entities.
//! - [`RawAuthor`] and [`RawWork`] mirror the loosely-typed records embedded in dump lines.
//!   They use the lenient deserializers in [`crate::parsers::deserializers`].

pub mod author;
pub mod book;
pub mod dump;

pub use author::Author;
pub use book::Book;
pub use dump::{RawAuthor, RawWork, TextValue};
