//! Sync error taxonomy
//!
//! Remote-provider failures are classified into a small set of categories so
//! the web layer can turn them into meaningful responses. Storage failures
//! fold into `Unknown`; the reconciliation transaction has already rolled
//! back by the time one surfaces.

use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Configured remote folder not found: {0}")]
    FolderNotFound(String),

    #[error("Network error talking to remote provider: {0}")]
    Network(String),

    #[error("Failed to generate temporary link for {path}: {message}")]
    LinkGeneration { path: String, message: String },

    #[error("Sync failed: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl From<BridgeError> for SyncError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unauthorized(msg) => SyncError::Unauthorized(msg),
            BridgeError::NotFound(msg) => SyncError::FolderNotFound(msg),
            BridgeError::Network(msg) => SyncError::Network(msg),
            other => SyncError::Unknown(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        SyncError::Unknown(format!("database error: {}", err))
    }
}

impl From<core_library::error::LibraryError> for SyncError {
    fn from(err: core_library::error::LibraryError) -> Self {
        SyncError::Unknown(err.to_string())
    }
}
