//! Key-value metadata repository
//!
//! Small persistent store for bookkeeping values that don't deserve their
//! own table, e.g. the last sync instant written by the reconciler.

use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Metadata key holding the RFC 3339 instant of the last completed sync.
pub const LAST_REMOTE_SYNC_KEY: &str = "last_remote_sync";

/// Metadata repository interface
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Get a metadata value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a metadata value, inserting or replacing on key conflict
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite implementation of MetadataRepository
pub struct SqliteMetadataRepository {
    pool: SqlitePool,
}

impl SqliteMetadataRepository {
    /// Create a new SQLite metadata repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataRepository for SqliteMetadataRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<(String,)> =
            sqlx::query_as("SELECT value FROM app_metadata WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.map(|(v,)| v))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO app_metadata (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
