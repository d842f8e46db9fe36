//! Remote Storage Abstraction
//!
//! Platform-agnostic trait for listing a cloud folder tree and issuing
//! time-limited streaming links for individual files.

use async_trait::async_trait;

use crate::error::Result;

/// One entry from a remote folder listing.
///
/// `path` is the provider's display path (leading `/`, original casing);
/// it doubles as the stable identity of the entry across listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Full display path, e.g. `/Shows/Anthem/Anthem_demo.mp3`
    pub path: String,

    /// File or folder name without the parent path
    pub name: String,

    /// Size in bytes; `None` for folders
    pub size: Option<u64>,

    /// Whether this entry is a folder
    pub is_folder: bool,
}

/// Remote storage provider trait
///
/// Implementations wrap one cloud storage backend. Listing is paginated:
/// the first call passes `cursor = None`, and the provider returns the next
/// cursor until the listing is exhausted.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::StorageProvider;
///
/// async fn list_all(provider: &dyn StorageProvider, root: &str) -> Result<Vec<RemoteEntry>> {
///     let mut entries = Vec::new();
///     let mut cursor = None;
///     loop {
///         let (page, next) = provider.list_folder(root, cursor).await?;
///         entries.extend(page);
///         match next {
///             Some(c) => cursor = Some(c),
///             None => break,
///         }
///     }
///     Ok(entries)
/// }
/// ```
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// List one page of the recursive folder tree under `root_path`.
    ///
    /// Returns the entries of this page and, when more pages remain, a
    /// cursor for the next call.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Unauthorized`](crate::BridgeError::Unauthorized) if
    ///   credentials are missing or expired
    /// - [`BridgeError::NotFound`](crate::BridgeError::NotFound) if
    ///   `root_path` does not exist remotely
    /// - [`BridgeError::Network`](crate::BridgeError::Network) on transport
    ///   failure
    async fn list_folder(
        &self,
        root_path: &str,
        cursor: Option<String>,
    ) -> Result<(Vec<RemoteEntry>, Option<String>)>;

    /// Issue a short-lived direct-download URL for one remote file.
    ///
    /// The link is provider-issued and expires on the provider's schedule;
    /// callers are responsible for caching within that window.
    async fn get_temporary_link(&self, file_path: &str) -> Result<String>;
}
