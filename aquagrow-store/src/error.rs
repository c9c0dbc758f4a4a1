//! Error types for aquagrow-store

use thiserror::Error;

/// Failures raised by a [`StoragePort`](crate::storage::StoragePort) implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
}

/// Failures surfaced by the record store to its callers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage port could not be read or written
    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),

    /// The persisted document could not be decoded; the raw payload was
    /// copied to `backup_key` before failing.
    #[error("Saved data is corrupted and cannot be loaded; a backup was written to '{backup_key}'")]
    DataCorrupted { backup_key: String },

    /// Update or lookup of an id that is not in the collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Delete of an id that is not in the collection
    #[error("{kind} not found for deletion: {id}")]
    NotFoundForDeletion { kind: &'static str, id: String },

    /// A record violated a field invariant
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
