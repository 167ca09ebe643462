use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that overrides the store directory
pub const STORE_DIR_ENV: &str = "OPENLIBRARY_STORE_DIR";

/// Get the default store directory (platform data dir + `openlibrary-loader`)
pub fn default_store_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(data_dir.join("openlibrary-loader"))
}

/// Pick the store directory: an explicit path first, then `OPENLIBRARY_STORE_DIR`, then the
/// platform default
pub fn resolve_store_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = configured {
        return Ok(dir);
    }
    match env::var_os(STORE_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_store_dir(),
    }
}
