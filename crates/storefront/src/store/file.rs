//! File-backed persistent store.
//!
//! One JSON object per data directory (`store.json`), loaded at open and
//! rewritten whole on every mutation. Last-writer-wins at the granularity of
//! the full map, which matches how the cart persists complete snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{PersistentStore, StoreError};

const STORE_FILE: &str = "store.json";

/// Durable store backed by a single JSON file.
///
/// Cheaply cloneable; clones share the same backing file and in-memory map.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<Mutex<FileStoreInner>>,
}

#[derive(Debug)]
struct FileStoreInner {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open (or create) the store under `data_dir`.
    ///
    /// A missing file starts empty; an unreadable or corrupt file is logged
    /// and also starts empty rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!("corrupt store file {}: {err}; starting empty", path.display());
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::warn!("unreadable store file {}: {err}; starting empty", path.display());
                HashMap::new()
            }
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(FileStoreInner { path, entries })),
        })
    }

    fn flush(inner: &FileStoreInner) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&inner.entries)?;
        std::fs::write(&inner.path, raw)?;
        Ok(())
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.entries.insert(key.to_string(), value.to_string());
        Self::flush(&inner)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.entries.remove(key);
        Self::flush(&inner)
    }
}
