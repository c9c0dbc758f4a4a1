//! Key/value storage port.
//!
//! The record store never talks to a concrete storage runtime. It is
//! handed something implementing [`StoragePort`]:
//! - [`MemoryStorage`] for tests and throwaway runs
//! - [`SledStorage`] for a durable on-disk slot

mod memory;
mod sled_store;

pub use memory::MemoryStorage;
pub use sled_store::SledStorage;

use async_trait::async_trait;

use crate::error::StorageError;

/// String-keyed slot storage, the shape of browser local storage.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    ///
    /// A reader must observe either the previous value or the new one,
    /// never a partial write.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// List keys starting with `prefix`, sorted.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}
