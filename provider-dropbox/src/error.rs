//! Error types for the Dropbox provider

use thiserror::Error;

/// Dropbox provider errors
#[derive(Error, Debug)]
pub enum DropboxError {
    /// Access token missing, invalid, or expired (HTTP 401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested path does not exist remotely (HTTP 409 with a
    /// `path/...` error summary)
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// API request returned an error
    #[error("Dropbox API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

/// Result type for Dropbox operations
pub type Result<T> = std::result::Result<T, DropboxError>;

impl From<DropboxError> for bridge_traits::error::BridgeError {
    fn from(error: DropboxError) -> Self {
        match error {
            DropboxError::AuthenticationFailed(msg) => {
                bridge_traits::error::BridgeError::Unauthorized(msg)
            }
            DropboxError::PathNotFound { path } => {
                bridge_traits::error::BridgeError::NotFound(path)
            }
            DropboxError::NetworkError(msg) => bridge_traits::error::BridgeError::Network(msg),
            DropboxError::ApiError {
                status_code,
                message,
            } => bridge_traits::error::BridgeError::OperationFailed(format!(
                "Dropbox API error (status {}): {}",
                status_code, message
            )),
            DropboxError::ParseError(msg) => {
                bridge_traits::error::BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            DropboxError::BridgeError(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;

    #[test]
    fn test_error_display() {
        let error = DropboxError::ApiError {
            status_code: 429,
            message: "too_many_requests".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Dropbox API error (status 429): too_many_requests"
        );
    }

    #[test]
    fn test_classification_preserved_in_conversion() {
        let unauthorized: BridgeError =
            DropboxError::AuthenticationFailed("expired token".to_string()).into();
        assert!(matches!(unauthorized, BridgeError::Unauthorized(_)));

        let not_found: BridgeError = DropboxError::PathNotFound {
            path: "/Missing".to_string(),
        }
        .into();
        assert!(matches!(not_found, BridgeError::NotFound(_)));

        let network: BridgeError = DropboxError::NetworkError("timeout".to_string()).into();
        assert!(matches!(network, BridgeError::Network(_)));
    }
}
