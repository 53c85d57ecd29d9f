// File-backed key-value store
// All keys live in one JSON object file, written atomically (temp file + rename)

use super::{KeyValueStore, StorageError};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Key-value store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStore {
    /// Last successfully written (or loaded) contents
    values: Mutex<BTreeMap<String, String>>,
    /// Path to persistence file
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that cannot be read or does
    /// not hold a JSON object of strings fails with `Corrupt` so the caller
    /// can decide how to degrade.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        crate::debug!("Opening storage file {:?}", path);

        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| StorageError::Corrupt(format!("Failed to read {:?}: {}", path, e)))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str::<BTreeMap<String, String>>(&content)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?
            }
        } else {
            crate::debug!("No storage file found, starting with empty store");
            BTreeMap::new()
        };

        crate::info!("Loaded {} storage keys from {:?}", values.len(), path);
        Ok(Self {
            values: Mutex::new(values),
            path,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `values` using atomic temp file + rename
    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path).map_err(|e| {
                StorageError::Unavailable(format!("Failed to create temp file: {}", e))
            })?;
            file.write_all(content.as_bytes())
                .map_err(|e| StorageError::Unavailable(format!("Failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| StorageError::Unavailable(format!("Failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::Unavailable(format!("Failed to rename: {}", e))
        })
    }

    /// Apply `change` to a copy of the current values, write it, and only then
    /// commit it to the cache.
    fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut guard = self.values.lock();
        let mut next = guard.clone();
        change(&mut next);
        self.write(&next)?;
        *guard = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        crate::trace!("Storing {} bytes under '{}'", value.len(), key);
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
