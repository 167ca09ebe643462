pub mod environment;

pub use environment::{STORE_DIR_ENV, default_store_dir, resolve_store_dir};
