// Snippet store - owns the template collection and persists it after every mutation
// Follows the same load/persist shape as the storage-backed stores elsewhere in the crate

use super::{default_templates, Template};
use crate::storage::{keys, KeyValueStore, StorageError};
use serde_json::Value;
use std::sync::Arc;

/// Error types for snippet store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetError {
    /// Import payload is not an array of template records
    #[error("Invalid template format: {0}")]
    InvalidFormat(String),
    /// Update/remove addressed a position outside the collection
    #[error("Template index {index} out of range (collection has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// The mutation was applied in memory but could not be persisted
    #[error("Templates kept in memory only: {0}")]
    StorageUnavailable(#[from] StorageError),
    /// A required draft field was blank
    #[error("Template {0} cannot be empty")]
    EmptyField(&'static str),
}

/// Describe a JSON value's kind for error messages
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a JSON value into a template collection, all or nothing.
fn parse_collection(value: Value) -> Result<Vec<Template>, SnippetError> {
    let Value::Array(items) = value else {
        return Err(SnippetError::InvalidFormat(format!(
            "expected an array of templates, got {}",
            kind_of(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(SnippetError::InvalidFormat(format!(
                    "item {} is {}, expected an object",
                    i,
                    kind_of(&item)
                )));
            }
            serde_json::from_value::<Template>(item)
                .map_err(|e| SnippetError::InvalidFormat(format!("item {}: {}", i, e)))
        })
        .collect()
}

/// Ordered template collection backed by a key-value store.
///
/// Positions are the only identity; duplicate triggers are allowed.
pub struct SnippetStore {
    templates: Vec<Template>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SnippetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetStore")
            .field("templates", &self.templates.len())
            .field("key", &self.key)
            .finish()
    }
}

impl SnippetStore {
    /// Create an empty store persisting under the default key
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, keys::SNIPPETS)
    }

    /// Create an empty store persisting under `key`
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            templates: Vec::new(),
            storage,
            key: key.into(),
        }
    }

    /// Load the persisted collection.
    ///
    /// Missing, unreadable or malformed data replaces the collection with the
    /// built-in defaults. Never fails.
    pub fn load(&mut self) {
        crate::debug!("Loading templates from '{}'", self.key);

        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                crate::debug!("No persisted templates, using defaults");
                self.templates = default_templates();
                return;
            }
            Err(e) => {
                crate::warn!("Failed to read templates, using defaults: {}", e);
                self.templates = default_templates();
                return;
            }
        };

        let parsed = serde_json::from_str::<Value>(&raw)
            .map_err(|e| SnippetError::InvalidFormat(e.to_string()))
            .and_then(parse_collection);

        match parsed {
            Ok(templates) => {
                self.templates = templates;
                crate::info!("Loaded {} templates", self.templates.len());
            }
            Err(e) => {
                crate::warn!("Persisted templates are malformed, using defaults: {}", e);
                self.templates = default_templates();
            }
        }
    }

    /// Write the whole collection to storage
    fn persist(&self) -> Result<(), SnippetError> {
        crate::debug!("Persisting {} templates", self.templates.len());
        let content = serde_json::to_string(&self.templates)
            .map_err(|e| SnippetError::InvalidFormat(e.to_string()))?;
        self.storage.set(&self.key, &content).map_err(|e| {
            crate::warn!("Failed to persist templates: {}", e);
            SnippetError::StorageUnavailable(e)
        })
    }

    /// Current collection in order
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Position of the first template using `trigger`.
    ///
    /// Duplicates are allowed; callers use this to warn before adding one.
    pub fn find_trigger(&self, trigger: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.trigger == trigger)
    }

    fn check_index(&self, index: usize) -> Result<(), SnippetError> {
        if index >= self.templates.len() {
            return Err(SnippetError::IndexOutOfRange {
                index,
                len: self.templates.len(),
            });
        }
        Ok(())
    }

    /// Append a template.
    ///
    /// `StorageUnavailable` means the template was added in memory only.
    #[must_use = "this returns a Result that should be handled"]
    pub fn add(&mut self, template: Template) -> Result<(), SnippetError> {
        self.templates.push(template);
        self.persist()
    }

    /// Replace the template at `index`.
    #[must_use = "this returns a Result that should be handled"]
    pub fn update(&mut self, index: usize, template: Template) -> Result<(), SnippetError> {
        self.check_index(index)?;
        self.templates[index] = template;
        self.persist()
    }

    /// Remove the template at `index`, shifting later ones down.
    ///
    /// On `StorageUnavailable` the template is already gone from memory.
    #[must_use = "this returns a Result that should be handled"]
    pub fn remove(&mut self, index: usize) -> Result<Template, SnippetError> {
        self.check_index(index)?;
        let removed = self.templates.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Replace the whole collection with `value`, which must be an array of
    /// template objects. Returns the new length.
    #[must_use = "this returns a Result that should be handled"]
    pub fn import(&mut self, value: Value) -> Result<usize, SnippetError> {
        let templates = parse_collection(value)?;
        self.templates = templates;
        crate::info!("Imported {} templates", self.templates.len());
        self.persist()?;
        Ok(self.templates.len())
    }

    /// Parse `json` and import it. Unparseable text is `InvalidFormat`.
    #[must_use = "this returns a Result that should be handled"]
    pub fn import_json(&mut self, json: &str) -> Result<usize, SnippetError> {
        let value = serde_json::from_str::<Value>(json)
            .map_err(|e| SnippetError::InvalidFormat(e.to_string()))?;
        self.import(value)
    }

    /// Pretty-printed JSON of the collection, suitable for `import_json`
    pub fn export(&self) -> String {
        serde_json::to_string_pretty(&self.templates).unwrap_or_else(|e| {
            crate::error!("Failed to serialize templates: {}", e);
            "[]".to_string()
        })
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
