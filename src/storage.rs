//! Persistent key-value storage backing the favorites and custom prompt stores
//!
//! Each store owns exactly one key and writes its whole collection as a JSON
//! string on every change. Two backends are provided: [`FileStore`], one file
//! per key in the data directory, and [`MemoryStore`] for tests and
//! ephemeral sessions.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure while reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a best-effort write
///
/// Mutations always apply in memory first; this only reports whether the new
/// state also reached storage.
#[must_use = "persistence failures should be logged or explicitly ignored"]
#[derive(Debug)]
pub enum Persistence {
    Saved,
    Failed(StorageError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    /// Emit a warning for a failed write and drop the status.
    pub fn log_failure(self, store: &str) {
        if let Persistence::Failed(error) = self {
            tracing::warn!(store = store, error = %error, "Persisting store failed");
        }
    }
}

impl From<Result<(), StorageError>> for Persistence {
    fn from(result: Result<(), StorageError>) -> Self {
        match result {
            Ok(()) => Persistence::Saved,
            Err(error) => Persistence::Failed(error),
        }
    }
}

/// String-valued key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`. A missing key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.base_dir).map_err(io_err)?;

        // Write beside the target, then rename over it
        let mut temp = NamedTempFile::new_in(&self.base_dir).map_err(io_err)?;
        temp.write_all(value.as_bytes()).map_err(io_err)?;
        temp.flush().map_err(io_err)?;
        temp.persist(self.key_path(key))
            .map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

/// In-memory storage
///
/// Clones share the same map, so building a second store over a clone
/// behaves like reopening the same storage after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text under a key, bypassing any store.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode a JSON value, falling back to its default on any failure.
pub(crate) fn load_or_default<T>(storage: &dyn KeyValueStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let decoded = storage.read(key).and_then(|raw| match raw {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        }),
        None => Ok(T::default()),
    });

    match decoded {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key = key, error = %error, "Stored state unreadable, starting empty");
            T::default()
        }
    }
}

/// Encode a value as JSON and write it under `key`.
pub(crate) fn save_json<T>(storage: &dyn KeyValueStore, key: &str, value: &T) -> Persistence
where
    T: serde::Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })
        .and_then(|json| storage.write(key, &json));
    Persistence::from(result)
}

/// Callbacks run after a store mutates its in-memory state
pub struct Observers<T: ?Sized> {
    callbacks: Vec<Box<dyn FnMut(&T)>>,
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<T: ?Sized> Observers<T> {
    pub fn push(&mut self, callback: impl FnMut(&T) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn notify(&mut self, state: &T) {
        for callback in &mut self.callbacks {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .take(64)
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
