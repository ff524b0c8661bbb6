//! In-memory `KeyValueStore`.

use async_trait::async_trait;
use jalmitra_core::error::{JalmitraError, Result};
use jalmitra_core::storage::KeyValueStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A store that lives as long as its clones do.
///
/// Clones share the same entries, so handing a clone to a second set of
/// managers models a reload over the same durable storage. Writes can be
/// switched to fail to exercise `StorageWriteFailed` paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(JalmitraError::storage_write_failed("store is read-only"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryKeyValueStore::new();
        let reloaded = store.clone();

        store.set("farmerId", "F123").await.unwrap();
        assert_eq!(reloaded.get("farmerId").await.unwrap().as_deref(), Some("F123"));
    }

    #[tokio::test]
    async fn test_fail_writes_leaves_entries_untouched() {
        let store = MemoryKeyValueStore::new();
        store.set("farmerId", "F123").await.unwrap();

        store.set_fail_writes(true);
        assert!(store.set("farmerId", "F999").await.unwrap_err().is_storage_write_failed());
        assert!(store.remove("farmerId").await.is_err());
        assert_eq!(store.get("farmerId").await.unwrap().as_deref(), Some("F123"));
    }
}
