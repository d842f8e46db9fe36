//! # Dropbox Storage Provider
//!
//! Implements the `StorageProvider` bridge trait for the Dropbox HTTP API v2.
//!
//! ## Features
//!
//! - Recursive folder listing with cursor-based pagination
//!   (`files/list_folder` + `files/list_folder/continue`)
//! - Short-lived direct-download links (`files/get_temporary_link`,
//!   provider-side lifetime of four hours)
//! - Error classification preserving auth / not-found / network distinctions

mod connector;
mod error;
mod types;

pub use connector::DropboxConnector;
pub use error::{DropboxError, Result};
