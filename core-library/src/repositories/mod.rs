//! # Repository Pattern Implementation
//!
//! Repository traits and SQLite implementations for data access.
//!
//! ## Architecture
//!
//! - Traits define the interface for each repository
//! - SQLite implementations use sqlx for async database access
//! - All operations return `Result<T>` for error handling
//!
//! ## Available Repositories
//!
//! - `SongRepository` - songs written by the sync reconciler
//! - `VersionRepository` - playable versions belonging to songs
//! - `NotificationRepository` - per-user notification records
//! - `UserRepository` - band member accounts (broadcast source)
//! - `MetadataRepository` - key-value store for sync bookkeeping

pub mod metadata;
pub mod notification;
pub mod song;
pub mod user;
pub mod version;

pub use metadata::{MetadataRepository, SqliteMetadataRepository};
pub use notification::{NotificationRepository, SqliteNotificationRepository};
pub use song::{SongRepository, SqliteSongRepository};
pub use user::{SqliteUserRepository, UserRepository};
pub use version::{SqliteVersionRepository, VersionRepository};
