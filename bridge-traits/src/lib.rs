//! # Host Bridge Traits
//!
//! Platform abstraction traits implemented by each host environment.
//!
//! ## Overview
//!
//! This crate defines the contract between the sync core and the outside
//! world. Each trait represents a capability the core requires but that is
//! provided by a concrete adapter:
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP transport with retry and TLS
//! - [`StorageProvider`](storage::StorageProvider) - remote file listing and
//!   temporary streaming links for a cloud folder tree
//!
//! Concrete adapters live in `bridge-desktop` (reqwest transport) and the
//! `provider-*` crates (cloud storage backends).

pub mod error;
pub mod http;
pub mod storage;

pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use storage::{RemoteEntry, StorageProvider};
