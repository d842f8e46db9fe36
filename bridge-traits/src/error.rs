use thiserror::Error;

/// Errors surfaced by bridge implementations.
///
/// Cloud providers map their wire-level failures onto these variants so the
/// sync layer can classify them without knowing which backend produced them.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
