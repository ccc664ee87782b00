//! Persisted language choice

use crate::error::{I18nError, I18nResult};
use altseting_common::Language;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value storage scoped to the site, the shape of browser local storage
pub trait LanguageStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str);
}

/// Store that lives as long as the page
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Store backed by a JSON object on disk, surviving between sessions.
///
/// An unreadable or corrupt file reads as empty; failed writes are logged and
/// otherwise ignored, matching the silent behavior of browser storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating nothing until the first write
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Ignoring corrupt language store {:?}: {}", path, e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all entries to disk
    pub fn flush(&self) -> I18nResult<()> {
        let io_error = |source: std::io::Error| I18nError::Io {
            path: self.path.display().to_string(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(|e| io_error(e.into()))?;
        fs::write(&self.path, bytes).map_err(io_error)
    }
}

impl LanguageStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            warn!("Failed to persist language store: {}", e);
        }
    }
}

/// Reads and writes the last rendered language under a fixed key
#[derive(Debug, Clone)]
pub struct Persistence {
    key: String,
    default_language: Language,
}

impl Persistence {
    /// Create a persistence helper for `key`
    pub fn new(key: impl Into<String>, default_language: Language) -> Self {
        Self {
            key: key.into(),
            default_language,
        }
    }

    /// The storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record the rendered language, overwriting the previous value
    pub fn save<S: LanguageStore + ?Sized>(&self, store: &mut S, language: Language) {
        store.set(&self.key, language.code());
        debug!(key = %self.key, %language, "Saved language");
    }

    /// The stored code, or the default language code when absent or empty.
    ///
    /// The value is returned as stored; unsupported codes are normalized by
    /// the load that consumes it.
    pub fn load_initial<S: LanguageStore + ?Sized>(&self, store: &S) -> String {
        match store.get(&self.key) {
            Some(code) if !code.is_empty() => code,
            _ => self.default_language.code().to_string(),
        }
    }
}
