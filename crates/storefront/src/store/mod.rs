//! Durable key/value persistence.
//!
//! The cart ledger and the first-purchase flag survive restarts through a
//! small string-keyed store. The trait keeps the core testable against an
//! in-memory fake; production uses [`FileStore`]. Store failures are logged
//! and swallowed at the call sites; the in-memory state stays authoritative
//! for the process lifetime.

mod file;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;

/// Persisted keys, wire-compatible with the original widget.
pub mod keys {
    /// JSON array of cart line items.
    pub const CART: &str = "saka_cart_v1";

    /// First-purchase discount flag; the literal string `"true"` once set.
    pub const FIRST_PURCHASE: &str = "saka_first_purchase";
}

/// Value written under [`keys::FIRST_PURCHASE`] once the discount is consumed.
const FIRST_PURCHASE_SET: &str = "true";

/// Errors from the persistence layer.
///
/// Never fatal: callers log these and keep going with in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be serialized or deserialized.
    #[error("storage serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The store was configured to reject writes (test-only).
    #[error("storage unavailable")]
    Unavailable,
}

/// String-keyed durable storage.
pub trait PersistentStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value durably before returning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Unknown keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read and deserialize a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage or serialization failure.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

/// Whether the first-purchase discount has been consumed.
///
/// Absence, any non-`"true"` value, or a read failure all mean unused.
pub fn first_purchase_used<S: PersistentStore>(store: &S) -> bool {
    match store.get(keys::FIRST_PURCHASE) {
        Ok(value) => value.as_deref() == Some(FIRST_PURCHASE_SET),
        Err(err) => {
            tracing::warn!("failed to read first-purchase flag: {err}");
            false
        }
    }
}

/// Permanently mark the first-purchase discount as consumed.
///
/// There is no path that resets the flag. Write failures are swallowed.
pub fn mark_first_purchase_used<S: PersistentStore>(store: &S) {
    if let Err(err) = store.set(keys::FIRST_PURCHASE, FIRST_PURCHASE_SET) {
        tracing::warn!("failed to persist first-purchase flag: {err}");
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes always fail, for proving that
    /// persistence failures never break the interactive flow.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: true,
        }
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        store.set_json("nums", &vec![1, 2, 3]).unwrap();
        let nums: Option<Vec<i32>> = store.get_json("nums").unwrap();
        assert_eq!(nums.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_first_purchase_flag_lifecycle() {
        let store = MemoryStore::new();
        assert!(!first_purchase_used(&store));

        mark_first_purchase_used(&store);
        assert!(first_purchase_used(&store));

        // Marking again is idempotent.
        mark_first_purchase_used(&store);
        assert!(first_purchase_used(&store));
    }

    #[test]
    fn test_first_purchase_other_values_mean_unused() {
        let store = MemoryStore::new();
        store.set(keys::FIRST_PURCHASE, "yes").unwrap();
        assert!(!first_purchase_used(&store));
    }

    #[test]
    fn test_failing_store_mark_is_swallowed() {
        let store = MemoryStore::failing();
        mark_first_purchase_used(&store);
        assert!(!first_purchase_used(&store));
    }
}
