//! In-memory storage port.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::StoragePort;
use crate::error::StorageError;

/// Storage held in a process-local map.
///
/// Clones share the same map, so a test can keep a handle and inspect or
/// tamper with what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.write().await.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let slots = self.slots.read().await;
        Ok(slots
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
