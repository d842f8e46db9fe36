//! Dropbox API request and response types
//!
//! Data structures for the Dropbox HTTP API v2 endpoints this provider uses.

use serde::{Deserialize, Serialize};

/// `files/list_folder` request body
///
/// See: https://www.dropbox.com/developers/documentation/http/documentation#files-list_folder
#[derive(Debug, Serialize)]
pub struct ListFolderRequest<'a> {
    /// Root path; the app-folder root is the empty string, not `/`
    pub path: &'a str,

    /// Whether to list the full tree
    pub recursive: bool,

    /// Maximum entries per page
    pub limit: u32,
}

/// `files/list_folder/continue` request body
#[derive(Debug, Serialize)]
pub struct ListFolderContinueRequest<'a> {
    pub cursor: &'a str,
}

/// `files/get_temporary_link` request body
#[derive(Debug, Serialize)]
pub struct GetTemporaryLinkRequest<'a> {
    pub path: &'a str,
}

/// One entry of a `files/list_folder` response
///
/// The `.tag` discriminator is `file`, `folder`, or `deleted`; size is only
/// present on files.
#[derive(Debug, Clone, Deserialize)]
pub struct DropboxEntry {
    #[serde(rename = ".tag")]
    pub tag: String,

    pub name: String,

    /// Display path with original casing; absent for some deleted entries
    pub path_display: Option<String>,

    pub size: Option<u64>,
}

/// `files/list_folder` (and `/continue`) response
#[derive(Debug, Deserialize)]
pub struct ListFolderResponse {
    pub entries: Vec<DropboxEntry>,

    pub cursor: String,

    pub has_more: bool,
}

/// `files/get_temporary_link` response
#[derive(Debug, Deserialize)]
pub struct TemporaryLinkResponse {
    pub link: String,
}

/// Error payload returned with non-2xx statuses
///
/// Only `error_summary` is inspected; the nested `error` union is kept as a
/// raw value for diagnostics.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_list_folder_response() {
        let json = r#"{
            "entries": [
                {
                    ".tag": "folder",
                    "name": "Anthem",
                    "path_lower": "/shows/anthem",
                    "path_display": "/Shows/Anthem",
                    "id": "id:a4ayc_80_OEAAAAAAAAAXw"
                },
                {
                    ".tag": "file",
                    "name": "Anthem_demo.mp3",
                    "path_lower": "/shows/anthem/anthem_demo.mp3",
                    "path_display": "/Shows/Anthem/Anthem_demo.mp3",
                    "id": "id:a4ayc_80_OEAAAAAAAAAYa",
                    "size": 4362721
                }
            ],
            "cursor": "ZtkX9_EHj3x7PMkVuFIhwKYXEpwpLwyxp9vMKomUhllil9q7eWiAu",
            "has_more": false
        }"#;

        let response: ListFolderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.entries.len(), 2);
        assert_eq!(response.entries[0].tag, "folder");
        assert_eq!(response.entries[0].size, None);
        assert_eq!(response.entries[1].tag, "file");
        assert_eq!(response.entries[1].size, Some(4362721));
        assert!(!response.has_more);
    }

    #[test]
    fn test_deserialize_temporary_link_response() {
        let json = r#"{
            "metadata": { "name": "Anthem_demo.mp3" },
            "link": "https://dl.dropboxusercontent.com/apitl/1/abc"
        }"#;

        let response: TemporaryLinkResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.link, "https://dl.dropboxusercontent.com/apitl/1/abc");
    }

    #[test]
    fn test_deserialize_error_response() {
        let json = r#"{
            "error_summary": "path/not_found/..",
            "error": { ".tag": "path", "path": { ".tag": "not_found" } }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert!(response.error_summary.starts_with("path/"));
    }

    #[test]
    fn test_serialize_list_folder_request() {
        let request = ListFolderRequest {
            path: "",
            recursive: true,
            limit: 2000,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["path"], "");
        assert_eq!(json["recursive"], true);
    }
}
