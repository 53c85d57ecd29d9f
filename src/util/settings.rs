//! Unified settings access utilities.
//!
//! Preferences are plain strings under fixed storage keys, read with
//! forgiving parsing: an unreadable or unexpected value means "default".

use crate::storage::{keys, KeyValueStore, StorageError};

/// Editor colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than "dark" is the light theme
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Trait for unified settings access on types that own a key-value store.
pub trait SettingsAccess {
    /// Get the backing store.
    fn storage(&self) -> &dyn KeyValueStore;

    /// Get a setting value by key.
    ///
    /// Storage errors are logged and read as "not set".
    fn get_setting(&self, key: &str) -> Option<String> {
        match self.storage().get(key) {
            Ok(value) => value,
            Err(e) => {
                crate::warn!("Failed to read setting '{}': {}", key, e);
                None
            }
        }
    }

    /// Read a boolean flag stored as "true"/"false".
    fn get_flag(&self, key: &str) -> bool {
        self.get_setting(key).as_deref() == Some("true")
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage().set(key, value)
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.set_setting(key, if value { "true" } else { "false" })
    }
}

/// User preferences restored at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub vim_enabled: bool,
    pub sidebar_open: bool,
}

impl Preferences {
    /// Read all preferences, falling back to defaults for anything missing.
    pub fn load<S: SettingsAccess + ?Sized>(settings: &S) -> Self {
        let prefs = Self {
            theme: Theme::from_stored(settings.get_setting(keys::THEME).as_deref()),
            vim_enabled: settings.get_flag(keys::VIM),
            sidebar_open: settings.get_flag(keys::SIDEBAR),
        };
        crate::debug!("Restored preferences: {:?}", prefs);
        prefs
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
