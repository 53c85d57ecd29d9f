//! Persisted key-value storage for the editor.
//!
//! Everything the editor keeps across runs goes through a flat string
//! key-value store, one key per concern:
//!
//! ```ignore
//! use crate::storage::{keys, KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set(keys::THEME, "dark")?;
//! assert_eq!(store.get(keys::THEME)?.as_deref(), Some("dark"));
//! ```

mod file;
mod memory;
mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, StorageError};

/// Fixed storage keys. No namespacing beyond the flat key.
pub mod keys {
    /// Document text
    pub const CONTENT: &str = "med_editor_content";
    /// Serialized template collection
    pub const SNIPPETS: &str = "med_editor_snippets";
    /// "dark" or "light"
    pub const THEME: &str = "med_editor_theme";
    /// "true" when vim emulation is enabled
    pub const VIM: &str = "med_editor_vim";
    /// "true" when the template sidebar was left open
    pub const SIDEBAR: &str = "med_editor_sidebar";
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
