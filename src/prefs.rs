//! Persisted locale preference.
//!
//! The last-selected locale code is stored as a single string: read once at
//! initialization, written on every committed locale change. Stored values
//! are opaque here; the provider validates them against the supported set.

use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Failure while persisting the preference.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to persist locale preference: {0}")]
    Io(#[from] std::io::Error),
}

/// Client-side storage for the selected locale code.
pub trait PreferenceStore: Send + Sync {
    /// The stored locale code, if any. Unreadable storage reads as absent.
    fn load(&self) -> Option<String>;

    /// Stores the locale code.
    fn save(&self, code: &str) -> Result<(), PreferenceError>;
}

/// Preference stored as a single-line file.
#[derive(Debug, Clone)]
pub struct FsPreferenceStore {
    /// Path of the preference file.
    path: PathBuf,
}

impl FsPreferenceStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FsPreferenceStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No stored locale preference");
            return None;
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let code = content.trim();
                if code.is_empty() { None } else { Some(code.to_string()) }
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to read locale preference");
                None
            }
        }
    }

    fn save(&self, code: &str) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, code)?;
        tracing::debug!(path = %self.path.display(), code, "Locale preference saved");
        Ok(())
    }
}

/// In-memory store for hosts without persistent storage (and for tests).
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    /// Last saved code.
    value: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a code, as if previously persisted.
    #[must_use]
    pub fn with_value(code: &str) -> Self {
        Self { value: Mutex::new(Some(code.to_string())) }
    }

    /// Acquires the inner lock, absorbing poisoning (writes are a single
    /// assignment and cannot leave torn data).
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.lock().clone()
    }

    fn save(&self, code: &str) -> Result<(), PreferenceError> {
        *self.lock() = Some(code.to_string());
        Ok(())
    }
}
