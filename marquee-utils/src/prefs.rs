// Preference store with graceful degradation
//
// Key/value storage for user preferences (currently the theme choice).
// Backed by a JSON file when a path is available; when the backing file
// cannot be read or written the store keeps working in memory so the
// features above it never notice.

use crate::theme::Theme;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur while loading or saving preferences
#[derive(Debug)]
pub enum PrefsError {
    /// Backing file could not be read
    ReadFailed(String),
    /// Backing file could not be written
    WriteFailed(String),
    /// Stored data was not valid JSON
    Serialization(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(msg) => write!(f, "Failed to read preferences: {}", msg),
            Self::WriteFailed(msg) => write!(f, "Failed to write preferences: {}", msg),
            Self::Serialization(msg) => write!(f, "Preference serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PrefsError {}

impl From<serde_json::Error> for PrefsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for preference operations
pub type PrefsResult<T> = Result<T, PrefsError>;

/// String key/value preference storage
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    pub const THEME_KEY: &'static str = "theme";

    /// Open a file-backed store.
    ///
    /// A missing file starts the store empty; an unreadable or corrupt file
    /// logs a warning and degrades to an empty in-memory store rather than
    /// failing initialization.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::load(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!("Marquee: {}", e);
                warn!("Marquee: continuing with in-memory preferences");
                return Self { path: None, values: BTreeMap::new() };
            }
        };
        Self {
            path: Some(path),
            values,
        }
    }

    /// Create a store with no backing file
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
        }
    }

    /// Whether writes reach a backing file
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a value (write-through).
    ///
    /// A failed write logs a warning and drops the backing file; the value
    /// is still available in memory for the rest of the session.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
        self.flush();
    }

    pub fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }

    /// Stored theme preference, if the user ever made an explicit choice
    pub fn theme(&self) -> Option<Theme> {
        self.get(Self::THEME_KEY).and_then(Theme::from_str)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set(Self::THEME_KEY, theme.to_string());
    }

    fn load(path: &PathBuf) -> PrefsResult<BTreeMap<String, String>> {
        if !path.exists() {
            info!("Marquee: no preference file at {:?}, starting empty", path);
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| PrefsError::ReadFailed(format!("{:?}: {}", path, e)))?;
        let values = serde_json::from_str(&raw)?;
        Ok(values)
    }

    fn flush(&mut self) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let result = serde_json::to_string_pretty(&self.values)
            .map_err(PrefsError::from)
            .and_then(|json| {
                fs::write(path, json)
                    .map_err(|e| PrefsError::WriteFailed(format!("{:?}: {}", path, e)))
            });
        if let Err(e) = result {
            warn!("Marquee: {}", e);
            warn!("Marquee: preferences degrade to in-memory for this session");
            self.path = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = PreferenceStore::open(&path);
        assert!(store.is_persistent());
        store.set_theme(Theme::Dark);

        // A fresh store sees the persisted value
        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("nothing.json"));
        assert!(store.is_persistent());
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let dir = tempdir().unwrap();
        // Parent directory does not exist, so the flush fails
        let mut store = PreferenceStore::open(dir.path().join("missing").join("prefs.json"));
        store.set("theme", "dark");

        assert!(!store.is_persistent());
        // The value is still readable in memory
        assert_eq!(store.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_corrupt_file_degrades_to_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::open(&path);
        assert!(!store.is_persistent());
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn test_remove() {
        let mut store = PreferenceStore::in_memory();
        store.set("theme", "light");
        assert_eq!(store.theme(), Some(Theme::Light));

        store.remove("theme");
        assert_eq!(store.theme(), None);
    }
}
