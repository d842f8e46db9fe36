//! Sync service configuration

use std::time::Duration;

/// Dropbox provider links last 4 hours; cache entries expire earlier to
/// leave a safety margin.
pub const DEFAULT_LINK_TTL: Duration = Duration::from_secs(3 * 3600 + 1800);

/// Soft cap on cached temporary links.
pub const DEFAULT_LINK_CACHE_CAPACITY: usize = 1000;

/// Configuration for the sync service
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Root of the band folder in the remote account. The account root is
    /// the empty string, not `/`.
    pub root_path: String,

    /// How long cached temporary links stay valid locally
    pub link_ttl: Duration,

    /// Soft capacity of the temporary link cache
    pub link_cache_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            link_ttl: DEFAULT_LINK_TTL,
            link_cache_capacity: DEFAULT_LINK_CACHE_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Config rooted at a specific remote folder, defaults elsewhere
    pub fn with_root(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Self::default()
        }
    }
}
