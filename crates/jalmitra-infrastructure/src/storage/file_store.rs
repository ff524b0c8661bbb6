//! File-backed `KeyValueStore`.

use async_trait::async_trait;
use jalmitra_core::error::{JalmitraError, Result};
use jalmitra_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::atomic_toml::AtomicTomlFile;

type Entries = BTreeMap<String, String>;

/// Keeps every key in one TOML table on disk.
///
/// Blocking file I/O runs on the blocking pool so callers on the async
/// executor are never stalled.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    file: AtomicTomlFile<Entries>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    async fn blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(AtomicTomlFile<Entries>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file))
            .await
            .map_err(|e| JalmitraError::internal(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            let entries = file.load().map_err(|e| e.into_read_error())?;
            Ok(entries.and_then(|mut entries| entries.remove(&key)))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.blocking(move |file| {
            file.update(Entries::new(), |entries| {
                entries.insert(key, value);
                Ok(())
            })
            .map_err(|e| e.into_write_error())
        })
        .await?;
        tracing::debug!(path = ?self.path(), "durable store updated");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            file.update(Entries::new(), |entries| {
                entries.remove(&key);
                Ok(())
            })
            .map_err(|e| e.into_write_error())
        })
        .await
    }
}
