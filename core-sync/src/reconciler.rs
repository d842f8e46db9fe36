//! Reconciliation of parsed candidates against the library database
//!
//! One reconciliation pass is a single transaction: song upserts, version
//! upserts, notification broadcast, stale cleanup, and the last-sync
//! metadata write all commit together or not at all. The latest full
//! listing is authoritative; persisted songs and versions absent from it
//! are deleted (cascading to their comments and ratings).

use chrono::{DateTime, Utc};
use core_library::models::{Notification, NOTIFICATION_NEW_SONG, NOTIFICATION_NEW_VERSION};
use core_library::repositories::metadata::LAST_REMOTE_SYNC_KEY;
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::parser::{SongCandidate, VersionCandidate};

/// Summary of one reconciliation pass, serialized for the web layer.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub new_songs: u64,
    pub new_versions: u64,
    pub notifications: Vec<Notification>,
    pub last_sync: DateTime<Utc>,
}

/// Writes parsed song/version candidates into the library.
pub struct Reconciler {
    pool: SqlitePool,
}

impl Reconciler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply one full-listing reconciliation pass.
    ///
    /// Songs are matched by `remote_folder_path`, versions by
    /// `remote_file_path`. Title lookups within the batch assume titles are
    /// unique per pass; two folders extracting to the same title would
    /// misattribute versions (known limitation of the naming heuristic).
    #[instrument(skip_all, fields(songs = songs.len(), versions = versions.len()))]
    pub async fn reconcile(
        &self,
        songs: &[SongCandidate],
        versions: &[VersionCandidate],
    ) -> Result<SyncResult> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let now_ts = now.timestamp();

        let (song_ids, new_songs) = self.upsert_songs(&mut tx, songs, now_ts).await?;
        let new_versions = self
            .upsert_versions(&mut tx, versions, &song_ids, now_ts)
            .await?;

        let notifications = self
            .broadcast_notifications(&mut tx, new_songs, new_versions, now_ts)
            .await?;

        self.delete_stale_versions(&mut tx, versions).await?;
        self.delete_stale_songs(&mut tx, songs).await?;

        sqlx::query(
            "INSERT INTO app_metadata (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(LAST_REMOTE_SYNC_KEY)
        .bind(now.to_rfc3339())
        .bind(now_ts)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Reconciliation complete: {} new songs, {} new versions, {} notifications",
            new_songs,
            new_versions,
            notifications.len()
        );

        Ok(SyncResult {
            new_songs,
            new_versions,
            notifications,
            last_sync: now,
        })
    }

    /// Upsert songs by folder path; returns the title → id map and the
    /// count of actual inserts.
    async fn upsert_songs(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        songs: &[SongCandidate],
        now_ts: i64,
    ) -> Result<(HashMap<String, i64>, u64)> {
        let mut song_ids = HashMap::new();
        let mut new_songs = 0u64;

        for song in songs {
            let existing: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM songs WHERE remote_folder_path = ?")
                    .bind(&song.folder_path)
                    .fetch_optional(&mut **tx)
                    .await?;

            let id = match existing {
                Some((id,)) => {
                    sqlx::query("UPDATE songs SET updated_at = ? WHERE id = ?")
                        .bind(now_ts)
                        .bind(id)
                        .execute(&mut **tx)
                        .await?;
                    id
                }
                None => {
                    let result = sqlx::query(
                        "INSERT INTO songs (title, remote_folder_path, created_at, updated_at)
                         VALUES (?, ?, ?, ?)",
                    )
                    .bind(&song.title)
                    .bind(&song.folder_path)
                    .bind(now_ts)
                    .bind(now_ts)
                    .execute(&mut **tx)
                    .await?;
                    new_songs += 1;
                    result.last_insert_rowid()
                }
            };

            if song_ids.insert(song.title.clone(), id).is_some() {
                warn!("Duplicate song title in batch: {}", song.title);
            }
        }

        Ok((song_ids, new_songs))
    }

    /// Upsert versions by file path; new only when the path was not
    /// persisted before this pass.
    async fn upsert_versions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        versions: &[VersionCandidate],
        song_ids: &HashMap<String, i64>,
        now_ts: i64,
    ) -> Result<u64> {
        let existing_paths: Vec<(String,)> =
            sqlx::query_as("SELECT remote_file_path FROM versions")
                .fetch_all(&mut **tx)
                .await?;
        let existing_paths: HashSet<String> =
            existing_paths.into_iter().map(|(p,)| p).collect();

        let mut new_versions = 0u64;

        for version in versions {
            let song_id = match song_ids.get(&version.song_title) {
                Some(id) => *id,
                None => {
                    warn!(
                        "Version {} has no matching song {}, skipping",
                        version.file_path, version.song_title
                    );
                    continue;
                }
            };

            sqlx::query(
                "INSERT INTO versions (song_id, version_name, remote_file_path, file_size, created_at)
                 VALUES (?, ?, ?, ?, ?)
                 ON CONFLICT (remote_file_path)
                 DO UPDATE SET song_id = excluded.song_id, file_size = excluded.file_size",
            )
            .bind(song_id)
            .bind(&version.version_name)
            .bind(&version.file_path)
            .bind(version.file_size)
            .bind(now_ts)
            .execute(&mut **tx)
            .await?;

            if !existing_paths.contains(&version.file_path) {
                new_versions += 1;
            }
        }

        Ok(new_versions)
    }

    /// One notification per user per nonzero count, carrying the aggregate.
    async fn broadcast_notifications(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        new_songs: u64,
        new_versions: u64,
        now_ts: i64,
    ) -> Result<Vec<Notification>> {
        let mut notifications = Vec::new();

        if new_songs == 0 && new_versions == 0 {
            return Ok(notifications);
        }

        let user_ids: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users")
            .fetch_all(&mut **tx)
            .await?;

        for (user_id,) in &user_ids {
            if new_songs > 0 {
                let notification = self
                    .insert_notification(
                        tx,
                        *user_id,
                        NOTIFICATION_NEW_SONG,
                        "New Songs Added",
                        &format!("{} new song(s) synced from Dropbox", new_songs),
                        now_ts,
                    )
                    .await?;
                notifications.push(notification);
            }

            if new_versions > 0 {
                let notification = self
                    .insert_notification(
                        tx,
                        *user_id,
                        NOTIFICATION_NEW_VERSION,
                        "New Versions Added",
                        &format!("{} new version(s) synced from Dropbox", new_versions),
                        now_ts,
                    )
                    .await?;
                notifications.push(notification);
            }
        }

        Ok(notifications)
    }

    async fn insert_notification(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        kind: &str,
        title: &str,
        message: &str,
        now_ts: i64,
    ) -> Result<Notification> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, type, title, message, related_id, is_read, created_at)
             VALUES (?, ?, ?, ?, NULL, 0, ?)",
        )
        .bind(user_id)
        .bind(kind)
        .bind(title)
        .bind(message)
        .bind(now_ts)
        .execute(&mut **tx)
        .await?;

        Ok(Notification {
            id: result.last_insert_rowid(),
            user_id,
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            related_id: None,
            is_read: false,
            created_at: now_ts,
        })
    }

    /// Delete persisted versions whose file path is absent from the batch.
    async fn delete_stale_versions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        versions: &[VersionCandidate],
    ) -> Result<()> {
        let candidate_paths: HashSet<&str> =
            versions.iter().map(|v| v.file_path.as_str()).collect();

        let persisted: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, remote_file_path FROM versions")
                .fetch_all(&mut **tx)
                .await?;

        for (id, path) in persisted {
            if !candidate_paths.contains(path.as_str()) {
                sqlx::query("DELETE FROM versions WHERE id = ?")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;
                info!("Deleted stale version: {}", path);
            }
        }

        Ok(())
    }

    /// Delete persisted songs whose folder path is absent from the batch.
    /// Cascades to any remaining versions, comments, and ratings.
    async fn delete_stale_songs(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        songs: &[SongCandidate],
    ) -> Result<()> {
        let candidate_paths: HashSet<&str> =
            songs.iter().map(|s| s.folder_path.as_str()).collect();

        let persisted: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, remote_folder_path FROM songs")
                .fetch_all(&mut **tx)
                .await?;

        for (id, path) in persisted {
            if !candidate_paths.contains(path.as_str()) {
                sqlx::query("DELETE FROM songs WHERE id = ?")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;
                info!("Deleted stale song: {}", path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_library::db::create_test_pool;

    fn song(title: &str, folder_path: &str) -> SongCandidate {
        SongCandidate {
            title: title.to_string(),
            folder_path: folder_path.to_string(),
        }
    }

    fn version(song_title: &str, name: &str, file_path: &str, size: i64) -> VersionCandidate {
        VersionCandidate {
            song_title: song_title.to_string(),
            version_name: name.to_string(),
            file_path: file_path.to_string(),
            file_size: size,
        }
    }

    async fn insert_user(pool: &SqlitePool, username: &str) -> i64 {
        sqlx::query(
            "INSERT INTO users (username, display_name, password_hash, created_at)
             VALUES (?, ?, 'x', 0)",
        )
        .bind(username)
        .bind(username)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn test_first_pass_inserts_everything() {
        let pool = create_test_pool().await.unwrap();
        insert_user(&pool, "alice").await;
        let reconciler = Reconciler::new(pool.clone());

        let result = reconciler
            .reconcile(
                &[song("Anthem", "/Demos/Anthem")],
                &[
                    version("Anthem", "Anthem_demo.mp3", "/Demos/Anthem_demo.mp3", 100),
                    version("Anthem", "Anthem_final.mp3", "/Demos/Anthem_final.mp3", 200),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result.new_songs, 1);
        assert_eq!(result.new_versions, 2);
        assert_eq!(count(&pool, "songs").await, 1);
        assert_eq!(count(&pool, "versions").await, 2);
    }

    #[tokio::test]
    async fn test_second_identical_pass_is_idempotent() {
        let pool = create_test_pool().await.unwrap();
        insert_user(&pool, "alice").await;
        let reconciler = Reconciler::new(pool.clone());

        let songs = vec![song("Anthem", "/Demos/Anthem")];
        let versions = vec![version(
            "Anthem",
            "Anthem_demo.mp3",
            "/Demos/Anthem_demo.mp3",
            100,
        )];

        reconciler.reconcile(&songs, &versions).await.unwrap();
        let second = reconciler.reconcile(&songs, &versions).await.unwrap();

        assert_eq!(second.new_songs, 0);
        assert_eq!(second.new_versions, 0);
        assert!(second.notifications.is_empty());
        assert_eq!(count(&pool, "songs").await, 1);
        assert_eq!(count(&pool, "versions").await, 1);
    }

    #[tokio::test]
    async fn test_existing_song_keeps_id_and_touches_updated_at() {
        let pool = create_test_pool().await.unwrap();
        let reconciler = Reconciler::new(pool.clone());

        let songs = vec![song("Anthem", "/Demos/Anthem")];
        reconciler.reconcile(&songs, &[]).await.unwrap();

        let (id_before, updated_before): (i64, i64) =
            sqlx::query_as("SELECT id, updated_at FROM songs WHERE remote_folder_path = ?")
                .bind("/Demos/Anthem")
                .fetch_one(&pool)
                .await
                .unwrap();

        sqlx::query("UPDATE songs SET updated_at = ? WHERE id = ?")
            .bind(updated_before - 100)
            .bind(id_before)
            .execute(&pool)
            .await
            .unwrap();

        reconciler.reconcile(&songs, &[]).await.unwrap();

        let (id_after, updated_after): (i64, i64) =
            sqlx::query_as("SELECT id, updated_at FROM songs WHERE remote_folder_path = ?")
                .bind("/Demos/Anthem")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(id_before, id_after);
        assert!(updated_after > updated_before - 100);
    }

    #[tokio::test]
    async fn test_notifications_broadcast_to_all_users() {
        let pool = create_test_pool().await.unwrap();
        insert_user(&pool, "alice").await;
        insert_user(&pool, "bob").await;
        let reconciler = Reconciler::new(pool.clone());

        let result = reconciler
            .reconcile(
                &[song("Anthem", "/Anthem")],
                &[version("Anthem", "Anthem.mp3", "/Anthem.mp3", 100)],
            )
            .await
            .unwrap();

        // One new-song and one new-version notification per user
        assert_eq!(result.new_songs, 1);
        assert_eq!(result.new_versions, 1);
        assert_eq!(result.notifications.len(), 4);
        assert_eq!(count(&pool, "notifications").await, 4);

        let kinds: Vec<String> = result
            .notifications
            .iter()
            .map(|n| n.kind.clone())
            .collect();
        assert!(kinds.contains(&NOTIFICATION_NEW_SONG.to_string()));
        assert!(kinds.contains(&NOTIFICATION_NEW_VERSION.to_string()));
        assert!(result.notifications[0].message.contains("1 new song(s)"));
    }

    #[tokio::test]
    async fn test_stale_version_deleted_song_kept() {
        let pool = create_test_pool().await.unwrap();
        let reconciler = Reconciler::new(pool.clone());

        let songs = vec![song("Anthem", "/Anthem")];
        reconciler
            .reconcile(
                &songs,
                &[
                    version("Anthem", "a.mp3", "/Anthem/a.mp3", 1),
                    version("Anthem", "b.mp3", "/Anthem/b.mp3", 2),
                ],
            )
            .await
            .unwrap();

        // b.mp3 disappears remotely; the song folder stays
        reconciler
            .reconcile(&songs, &[version("Anthem", "a.mp3", "/Anthem/a.mp3", 1)])
            .await
            .unwrap();

        assert_eq!(count(&pool, "songs").await, 1);
        assert_eq!(count(&pool, "versions").await, 1);
    }

    #[tokio::test]
    async fn test_stale_song_cascades_to_versions_comments_ratings() {
        let pool = create_test_pool().await.unwrap();
        let user_id = insert_user(&pool, "alice").await;
        let reconciler = Reconciler::new(pool.clone());

        reconciler
            .reconcile(
                &[song("Anthem", "/Anthem")],
                &[version("Anthem", "a.mp3", "/Anthem/a.mp3", 1)],
            )
            .await
            .unwrap();

        let (version_id,): (i64,) = sqlx::query_as("SELECT id FROM versions")
            .fetch_one(&pool)
            .await
            .unwrap();

        sqlx::query(
            "INSERT INTO comments (version_id, user_id, content, created_at, updated_at)
             VALUES (?, ?, 'nice take', 0, 0)",
        )
        .bind(version_id)
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO ratings (version_id, user_id, score, created_at, updated_at)
             VALUES (?, ?, 8, 0, 0)",
        )
        .bind(version_id)
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

        // The song vanishes from the listing entirely
        reconciler.reconcile(&[], &[]).await.unwrap();

        assert_eq!(count(&pool, "songs").await, 0);
        assert_eq!(count(&pool, "versions").await, 0);
        assert_eq!(count(&pool, "comments").await, 0);
        assert_eq!(count(&pool, "ratings").await, 0);
    }

    #[tokio::test]
    async fn test_version_moves_between_songs() {
        let pool = create_test_pool().await.unwrap();
        let reconciler = Reconciler::new(pool.clone());

        reconciler
            .reconcile(
                &[song("Anthem", "/Anthem")],
                &[version("Anthem", "take.mp3", "/take.mp3", 1)],
            )
            .await
            .unwrap();

        // Same file path now attributed to a different song
        let result = reconciler
            .reconcile(
                &[song("Ballad", "/Ballad")],
                &[version("Ballad", "take.mp3", "/take.mp3", 5)],
            )
            .await
            .unwrap();

        // Conflict update, not a new version
        assert_eq!(result.new_versions, 0);

        let (song_id, file_size): (i64, i64) =
            sqlx::query_as("SELECT song_id, file_size FROM versions WHERE remote_file_path = ?")
                .bind("/take.mp3")
                .fetch_one(&pool)
                .await
                .unwrap();

        let (ballad_id,): (i64,) =
            sqlx::query_as("SELECT id FROM songs WHERE remote_folder_path = '/Ballad'")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(song_id, ballad_id);
        assert_eq!(file_size, 5);
    }

    #[tokio::test]
    async fn test_failed_pass_leaves_no_partial_state() {
        let pool = create_test_pool().await.unwrap();
        let reconciler = Reconciler::new(pool.clone());

        // A negative size trips the file_size check constraint after the
        // song and first version have already been written in-transaction.
        let result = reconciler
            .reconcile(
                &[song("Anthem", "/Anthem")],
                &[
                    version("Anthem", "good.mp3", "/Anthem/good.mp3", 100),
                    version("Anthem", "bad.mp3", "/Anthem/bad.mp3", -1),
                ],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(count(&pool, "songs").await, 0);
        assert_eq!(count(&pool, "versions").await, 0);
        assert_eq!(count(&pool, "app_metadata").await, 0);
    }

    #[tokio::test]
    async fn test_last_sync_written_with_the_pass() {
        let pool = create_test_pool().await.unwrap();
        let reconciler = Reconciler::new(pool.clone());

        let result = reconciler.reconcile(&[], &[]).await.unwrap();

        let (value,): (String,) =
            sqlx::query_as("SELECT value FROM app_metadata WHERE key = ?")
                .bind(LAST_REMOTE_SYNC_KEY)
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(value, result.last_sync.to_rfc3339());
    }
}
