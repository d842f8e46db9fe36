//! Dropbox API connector implementation
//!
//! Implements the `StorageProvider` trait for the Dropbox HTTP API v2.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{RemoteEntry, StorageProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::DropboxError;
use crate::types::{
    DropboxEntry, GetTemporaryLinkRequest, ListFolderContinueRequest, ListFolderRequest,
    ListFolderResponse, TemporaryLinkResponse,
};

/// Dropbox API base URL
const DROPBOX_API_BASE: &str = "https://api.dropboxapi.com/2";

/// Maximum entries per page (Dropbox API limit)
const MAX_PAGE_SIZE: u32 = 2000;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Dropbox API connector
///
/// Implements `StorageProvider` for the Dropbox HTTP API v2.
///
/// # Features
///
/// - Recursive paginated folder listing via cursor continuation
/// - Temporary download link generation (links expire after 4 hours)
/// - OAuth 2.0 bearer authentication via `HttpClient`
///
/// # Example
///
/// ```ignore
/// use provider_dropbox::DropboxConnector;
/// use bridge_traits::storage::StorageProvider;
///
/// let connector = DropboxConnector::new(http_client, access_token);
/// let (entries, next_cursor) = connector.list_folder("", None).await?;
/// ```
pub struct DropboxConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// OAuth 2.0 access token
    access_token: String,
}

impl DropboxConnector {
    /// Create a new Dropbox connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `access_token` - OAuth 2.0 access token with `files.metadata.read`
    ///   and `sharing.read` scopes
    pub fn new(http_client: Arc<dyn HttpClient>, access_token: String) -> Self {
        Self {
            http_client,
            access_token,
        }
    }

    /// Convert a Dropbox entry to the provider-neutral representation
    ///
    /// Deleted entries and entries without a display path yield `None`.
    fn convert_entry(entry: DropboxEntry) -> Option<RemoteEntry> {
        if entry.tag == "deleted" {
            return None;
        }

        let path = entry.path_display?;

        Some(RemoteEntry {
            path,
            name: entry.name,
            size: entry.size,
            is_folder: entry.tag == "folder",
        })
    }

    /// POST a JSON body to an RPC endpoint and classify the response status
    ///
    /// 401 means the access token is invalid or expired; 409 carries a
    /// structured error body whose `error_summary` distinguishes missing
    /// paths from other conflicts.
    async fn post_json<T: serde::Serialize>(&self, endpoint: &str, body: &T) -> Result<HttpResponse> {
        let url = format!("{}/{}", DROPBOX_API_BASE, endpoint);

        let request = HttpRequest::new(HttpMethod::Post, url)
            .bearer_token(&self.access_token)
            .json(body)?
            .timeout(REQUEST_TIMEOUT);

        // Only transport failures count as network errors; anything else the
        // client reports keeps its own classification.
        let response = self.http_client.execute(request).await.map_err(|e| match e {
            BridgeError::Network(msg) => DropboxError::NetworkError(msg),
            other => DropboxError::BridgeError(other),
        })?;

        if response.is_success() {
            debug!("API request succeeded: endpoint={}", endpoint);
            return Ok(response);
        }

        Err(self.classify_failure(endpoint, &response).into())
    }

    fn classify_failure(&self, endpoint: &str, response: &HttpResponse) -> DropboxError {
        let status = response.status;

        let body_text = String::from_utf8_lossy(&response.body).to_string();

        if status == 401 {
            warn!("API request unauthorized: endpoint={}", endpoint);
            return DropboxError::AuthenticationFailed(body_text);
        }

        if status == 409 {
            let summary = response
                .json::<crate::types::ApiErrorResponse>()
                .map(|e| e.error_summary)
                .unwrap_or_default();

            if summary.starts_with("path/") {
                warn!(
                    "API request hit a missing path: endpoint={}, summary={}",
                    endpoint, summary
                );
                return DropboxError::PathNotFound {
                    path: summary,
                };
            }
        }

        warn!("API request failed: endpoint={}, status={}", endpoint, status);
        DropboxError::ApiError {
            status_code: status,
            message: body_text,
        }
    }
}

#[async_trait]
impl StorageProvider for DropboxConnector {
    #[instrument(skip(self), fields(root_path = %root_path))]
    async fn list_folder(
        &self,
        root_path: &str,
        cursor: Option<String>,
    ) -> Result<(Vec<RemoteEntry>, Option<String>)> {
        let response = match cursor {
            Some(ref cursor) => {
                debug!("Continuing folder listing");
                self.post_json(
                    "files/list_folder/continue",
                    &ListFolderContinueRequest { cursor },
                )
                .await?
            }
            None => {
                info!("Listing folder from Dropbox");
                self.post_json(
                    "files/list_folder",
                    &ListFolderRequest {
                        path: root_path,
                        recursive: true,
                        limit: MAX_PAGE_SIZE,
                    },
                )
                .await?
            }
        };

        let list_response: ListFolderResponse =
            serde_json::from_slice(&response.body).map_err(|e| {
                DropboxError::ParseError(format!("Failed to parse list_folder response: {}", e))
            })?;

        let entries: Vec<RemoteEntry> = list_response
            .entries
            .into_iter()
            .filter_map(Self::convert_entry)
            .collect();

        let next_cursor = list_response.has_more.then_some(list_response.cursor);

        info!(
            "Listed {} entries from Dropbox (has_more={})",
            entries.len(),
            next_cursor.is_some()
        );

        Ok((entries, next_cursor))
    }

    #[instrument(skip(self), fields(file_path = %file_path))]
    async fn get_temporary_link(&self, file_path: &str) -> Result<String> {
        info!("Requesting temporary link");

        let response = self
            .post_json(
                "files/get_temporary_link",
                &GetTemporaryLinkRequest { path: file_path },
            )
            .await?;

        let link_response: TemporaryLinkResponse =
            serde_json::from_slice(&response.body).map_err(|e| {
                DropboxError::ParseError(format!(
                    "Failed to parse get_temporary_link response: {}",
                    e
                ))
            })?;

        Ok(link_response.link)
    }
}
