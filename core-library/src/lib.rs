//! # Library Management Module
//!
//! Owns the canonical band library database and provides repository patterns
//! for data access.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite database schema and migrations
//! - Repository patterns for songs, versions, notifications, and users
//! - The key-value metadata store used for sync bookkeeping
//!
//! Writes performed during a sync pass bypass the repositories and run inside
//! a single transaction owned by the reconciler in `core-sync`; the
//! repositories here cover the read paths and user-facing mutations.

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{LibraryError, Result};
