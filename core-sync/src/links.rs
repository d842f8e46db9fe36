//! Temporary link cache
//!
//! Provider-issued download links expire after a few hours, and fetching
//! one costs a network round trip. This cache fronts the provider with a
//! bounded in-memory map of path → (url, expiry). Entries use a TTL shorter
//! than the provider's link lifetime so a cached link is never served after
//! the provider has invalidated it.
//!
//! Sweeps run every tenth insertion and whenever the map grows past its
//! soft capacity: expired entries go first, then the entries closest to
//! expiry until the map is back under capacity. Provider failures are never
//! cached.

use bridge_traits::storage::StorageProvider;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::{Result, SyncError};

/// Insertions between periodic sweeps.
const SWEEP_INTERVAL: u64 = 10;

struct CachedLink {
    url: String,
    expires_at: Instant,
}

struct CacheState {
    entries: HashMap<String, CachedLink>,
    insertions: u64,
}

/// Bounded TTL cache in front of the provider's temporary-link endpoint.
pub struct TempLinkCache {
    provider: Arc<dyn StorageProvider>,
    state: Mutex<CacheState>,
    ttl: Duration,
    capacity: usize,
}

impl TempLinkCache {
    pub fn new(provider: Arc<dyn StorageProvider>, ttl: Duration, capacity: usize) -> Self {
        Self {
            provider,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                insertions: 0,
            }),
            ttl,
            capacity,
        }
    }

    /// Get a streaming URL for a remote file, from cache when possible.
    ///
    /// A hit requires the entry's expiry to be strictly in the future.
    /// Misses call the provider; transport failures surface as `Network`
    /// and everything else as `LinkGeneration` with the path attached.
    #[instrument(skip(self), fields(file_path = %file_path))]
    pub async fn get_link(&self, file_path: &str) -> Result<String> {
        let now = Instant::now();

        {
            let state = self.state.lock().await;
            if let Some(cached) = state.entries.get(file_path) {
                if cached.expires_at > now {
                    debug!("Link cache hit");
                    return Ok(cached.url.clone());
                }
            }
        }

        debug!("Link cache miss, calling provider");
        let url = self
            .provider
            .get_temporary_link(file_path)
            .await
            .map_err(|e| match e {
                bridge_traits::error::BridgeError::Network(msg) => SyncError::Network(msg),
                other => SyncError::LinkGeneration {
                    path: file_path.to_string(),
                    message: other.to_string(),
                },
            })?;

        let mut state = self.state.lock().await;
        state.entries.insert(
            file_path.to_string(),
            CachedLink {
                url: url.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        state.insertions += 1;

        if state.insertions % SWEEP_INTERVAL == 0 || state.entries.len() > self.capacity {
            self.sweep(&mut state);
        }

        Ok(url)
    }

    /// Current number of cached entries, expired included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    /// Drop expired entries, then evict soonest-expiry entries while over
    /// capacity.
    fn sweep(&self, state: &mut CacheState) {
        let before = state.entries.len();
        let now = Instant::now();

        state.entries.retain(|_, link| link.expires_at > now);

        if state.entries.len() > self.capacity {
            // Evict a batch rather than a single entry so consecutive
            // insertions don't each pay for a full sort.
            let excess = state.entries.len() - self.capacity + self.capacity / 10;

            let mut by_expiry: Vec<(String, Instant)> = state
                .entries
                .iter()
                .map(|(path, link)| (path.clone(), link.expires_at))
                .collect();
            by_expiry.sort_by_key(|(_, expires_at)| *expires_at);

            for (path, _) in by_expiry.into_iter().take(excess) {
                state.entries.remove(&path);
            }
        }

        info!(
            "Link cache sweep: {} -> {} entries",
            before,
            state.entries.len()
        );
    }
}
