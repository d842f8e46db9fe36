//! Sync orchestration
//!
//! `SyncService` ties the subsystem together: it pulls the full recursive
//! listing from the storage provider, parses it into candidates, hands them
//! to the reconciler, and serves playback links through the temporary link
//! cache. It is an explicitly constructed service object; everything it
//! needs is injected, so tests can run any number of independent instances.

use bridge_traits::storage::{RemoteEntry, StorageProvider};
use chrono::{DateTime, Utc};
use core_library::repositories::metadata::LAST_REMOTE_SYNC_KEY;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::links::TempLinkCache;
use crate::parser::parse_structure;
use crate::reconciler::{Reconciler, SyncResult};

/// Facade over the band-folder sync subsystem.
pub struct SyncService {
    provider: Arc<dyn StorageProvider>,
    pool: SqlitePool,
    reconciler: Reconciler,
    link_cache: TempLinkCache,
    config: SyncConfig,
}

impl SyncService {
    pub fn new(provider: Arc<dyn StorageProvider>, pool: SqlitePool, config: SyncConfig) -> Self {
        let reconciler = Reconciler::new(pool.clone());
        let link_cache = TempLinkCache::new(
            provider.clone(),
            config.link_ttl,
            config.link_cache_capacity,
        );

        Self {
            provider,
            pool,
            reconciler,
            link_cache,
            config,
        }
    }

    /// Run one full sync pass against the configured root folder.
    ///
    /// Listing failures are classified per the provider's response:
    /// bad credentials become `Unauthorized`, a missing root folder
    /// `FolderNotFound`, transport problems `Network`, and anything else
    /// `Unknown` with the provider's message attached. The reconciliation
    /// itself is all-or-nothing; a failed pass leaves storage untouched.
    #[instrument(skip(self), fields(root_path = %self.config.root_path))]
    pub async fn sync(&self) -> Result<SyncResult> {
        info!("Starting sync");

        let entries = self.list_all_entries().await?;
        let parsed = parse_structure(&entries);

        let result = self
            .reconciler
            .reconcile(&parsed.songs, &parsed.versions)
            .await?;

        info!(
            "Sync finished: {} new songs, {} new versions",
            result.new_songs, result.new_versions
        );

        Ok(result)
    }

    /// Get a streaming URL for a remote file, via the link cache.
    pub async fn get_temporary_download_link(&self, file_path: &str) -> Result<String> {
        if file_path.is_empty() {
            return Err(SyncError::LinkGeneration {
                path: String::new(),
                message: "empty file path".to_string(),
            });
        }

        self.link_cache.get_link(file_path).await
    }

    /// When the last successful sync pass committed, if ever.
    pub async fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        let value: Option<(String,)> =
            sqlx::query_as("SELECT value FROM app_metadata WHERE key = ?")
                .bind(LAST_REMOTE_SYNC_KEY)
                .fetch_optional(&self.pool)
                .await?;

        match value {
            Some((raw,)) => {
                let parsed = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        SyncError::Unknown(format!("corrupt last-sync timestamp {:?}: {}", raw, e))
                    })?
                    .with_timezone(&Utc);
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Drain every page of the recursive listing.
    async fn list_all_entries(&self) -> Result<Vec<RemoteEntry>> {
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let (page, next_cursor) = self
                .provider
                .list_folder(&self.config.root_path, cursor)
                .await?;

            debug!("Fetched listing page with {} entries", page.len());
            entries.extend(page);

            match next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!("Listed {} entries total", entries.len());
        Ok(entries)
    }
}
