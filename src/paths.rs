// Filesystem locations for persisted editor data

use std::path::PathBuf;

/// Overrides the data directory when set
pub const DATA_DIR_ENV: &str = "MED_EDITOR_DATA_DIR";

/// File holding every storage key
pub const STORAGE_FILE: &str = "storage.json";

const APP_DIR: &str = "med-editor";

/// Errors resolving editor paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Could not determine the data directory")]
    DataDirNotFound,
}

/// Directory for editor data: `$MED_EDITOR_DATA_DIR`, else `<data dir>/med-editor`
pub fn get_data_dir() -> Result<PathBuf, PathError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(PathError::DataDirNotFound)
}

/// Path of the storage file inside the data directory
pub fn get_storage_path() -> Result<PathBuf, PathError> {
    Ok(get_data_dir()?.join(STORAGE_FILE))
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
