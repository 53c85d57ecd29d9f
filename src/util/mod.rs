//! Shared utilities for the editor backend.
//!
//! This module provides common functionality used across the codebase:
//! - `settings`: SettingsAccess trait and editor preferences
//! - `date`: Brazilian-locale date strings for stamps and file names

pub mod date;
mod settings;

pub use settings::{Preferences, SettingsAccess, Theme};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
