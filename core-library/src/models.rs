//! Domain models for the band library
//!
//! Rows map one-to-one onto the SQLite schema; ids are rowids and timestamps
//! are Unix seconds.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A band member account.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

/// A logical song: one or more recorded takes of the same piece.
///
/// `remote_folder_path` is the stable identity key matched across sync
/// passes; the title is display-only and may be re-derived differently
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub remote_folder_path: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One playable audio file belonging to a song.
///
/// `remote_file_path` is unique and identifies the version across sync
/// passes. Deleted by cascade when the parent song goes away.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Version {
    pub id: i64,
    pub song_id: i64,
    pub version_name: String,
    pub remote_file_path: String,
    pub file_size: i64,
    pub created_at: i64,
}

/// Notification kinds emitted by this subsystem.
pub const NOTIFICATION_NEW_SONG: &str = "new_song";
pub const NOTIFICATION_NEW_VERSION: &str = "new_version";

/// A per-user notification record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
}

/// One key-value row from the app metadata store.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}
