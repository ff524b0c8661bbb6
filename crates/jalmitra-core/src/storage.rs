//! Durable key-value storage port.

use async_trait::async_trait;

use crate::error::Result;

/// A durable string store that survives process restarts.
///
/// Each state container owns a disjoint set of keys and never touches the
/// others'. A successful `set`/`remove` must be visible to a fresh process
/// reading the same store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`. Fails with `StorageWriteFailed` when the
    /// write cannot be made durable.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
