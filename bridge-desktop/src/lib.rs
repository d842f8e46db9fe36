//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop/server platforms
//! (macOS, Windows, Linux).
//!
//! Currently provides:
//! - [`ReqwestHttpClient`] - `HttpClient` backed by `reqwest` with TLS,
//!   connection pooling, and retry with exponential backoff
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new());
//! // Hand to a provider connector
//! ```

mod http;

pub use http::ReqwestHttpClient;
