//! Version repository trait and implementation

use crate::error::Result;
use crate::models::Version;
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};

/// Version repository interface for read access
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Find a version by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Version>>;

    /// Find a version by its remote file path (the sync identity key)
    async fn find_by_file_path(&self, file_path: &str) -> Result<Option<Version>>;

    /// List all versions of one song, newest first
    async fn list_by_song(&self, song_id: i64) -> Result<Vec<Version>>;

    /// Count total versions
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of VersionRepository
pub struct SqliteVersionRepository {
    pool: SqlitePool,
}

impl SqliteVersionRepository {
    /// Create a new SQLite version repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for SqliteVersionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Version>> {
        let version = query_as::<_, Version>("SELECT * FROM versions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(version)
    }

    async fn find_by_file_path(&self, file_path: &str) -> Result<Option<Version>> {
        let version = query_as::<_, Version>("SELECT * FROM versions WHERE remote_file_path = ?")
            .bind(file_path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(version)
    }

    async fn list_by_song(&self, song_id: i64) -> Result<Vec<Version>> {
        let versions = query_as::<_, Version>(
            "SELECT * FROM versions WHERE song_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(song_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(versions)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM versions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
