//! Error types for aquagrow-site

use aquagrow_gateway::{GatewayError, LlmError};
use aquagrow_store::{StorageError, StoreError};
use thiserror::Error;

use crate::session::AuthError;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
