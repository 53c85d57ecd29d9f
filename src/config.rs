//! Runtime configuration.
//!
//! Defaults match the browser editor; environment variables override them.

use std::path::PathBuf;
use std::time::Duration;

/// Quiet period after the last edit before the document is persisted
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Overrides the autosave quiet period (milliseconds)
pub const AUTOSAVE_DELAY_ENV: &str = "MED_EDITOR_AUTOSAVE_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Quiet period before an edited document is written
    pub autosave_delay: Duration,
    /// Storage file; `None` resolves the default data directory
    pub storage_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
            storage_path: None,
        }
    }
}

impl EditorConfig {
    /// Defaults with environment overrides applied.
    ///
    /// An unparseable delay is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(AUTOSAVE_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.autosave_delay = Duration::from_millis(ms),
                Err(e) => crate::warn!("Ignoring {}={:?}: {}", AUTOSAVE_DELAY_ENV, raw, e),
            }
        }
        config
    }

    pub fn with_storage_path(mut self, path: PathBuf) -> Self {
        self.storage_path = Some(path);
        self
    }
}
