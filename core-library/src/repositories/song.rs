//! Song repository trait and implementation

use crate::error::Result;
use crate::models::Song;
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};

/// Song repository interface for read access
///
/// Songs are created and deleted exclusively by the sync reconciler; this
/// repository serves the web layer's read paths.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Find a song by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Song>>;

    /// Find a song by its remote folder path (the sync identity key)
    async fn find_by_folder_path(&self, folder_path: &str) -> Result<Option<Song>>;

    /// List all songs ordered by title
    async fn list(&self) -> Result<Vec<Song>>;

    /// Count total songs
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of SongRepository
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    /// Create a new SQLite song repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Song>> {
        let song = query_as::<_, Song>("SELECT * FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(song)
    }

    async fn find_by_folder_path(&self, folder_path: &str) -> Result<Option<Song>> {
        let song = query_as::<_, Song>("SELECT * FROM songs WHERE remote_folder_path = ?")
            .bind(folder_path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(song)
    }

    async fn list(&self) -> Result<Vec<Song>> {
        let songs = query_as::<_, Song>("SELECT * FROM songs ORDER BY title")
            .fetch_all(&self.pool)
            .await?;

        Ok(songs)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
