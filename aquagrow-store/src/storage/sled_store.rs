//! Durable storage port on a sled tree.

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use tracing::info;

use super::StoragePort;
use crate::error::StorageError;

/// Storage persisted to a local sled database.
pub struct SledStorage {
    db: Db,
}

impl SledStorage {
    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "Opened record storage");
        Ok(Self { db })
    }

    fn decode(key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| StorageError::Backend(format!("Slot '{}' is not UTF-8: {}", key, e)))
    }
}

#[async_trait]
impl StoragePort for SledStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(value) => Ok(Some(Self::decode(key, &value)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush_async().await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db.remove(key.as_bytes())?;
        self.db.flush_async().await?;
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for item in self.db.scan_prefix(prefix.as_bytes()) {
            let (key, _) = item?;
            if let Ok(key) = String::from_utf8(key.to_vec()) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.sled");

        {
            let storage = SledStorage::open(&path).unwrap();
            storage.set("aquaGrowDb", "{\"farmers\":[]}").await.unwrap();
        }

        let storage = SledStorage::open(&path).unwrap();
        assert_eq!(
            storage.get("aquaGrowDb").await.unwrap().as_deref(),
            Some("{\"farmers\":[]}")
        );
    }

    #[tokio::test]
    async fn test_prefix_scan_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SledStorage::open(temp_dir.path().join("db")).unwrap();

        storage.set("db_corrupted_backup_1", "x").await.unwrap();
        storage.set("db_corrupted_backup_2", "y").await.unwrap();
        storage.set("db", "{}").await.unwrap();

        let keys = storage.keys_with_prefix("db_corrupted_backup_").await.unwrap();
        assert_eq!(keys.len(), 2);

        storage.remove("db_corrupted_backup_1").await.unwrap();
        assert!(storage.get("db_corrupted_backup_1").await.unwrap().is_none());
    }
}
