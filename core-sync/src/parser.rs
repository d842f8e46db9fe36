//! Remote folder structure parsing
//!
//! Turns the flat recursive listing of the band folder into song and version
//! candidates for reconciliation. Folders and non-audio files are skipped;
//! audio files are classified by nesting depth:
//!
//! - depth 1 (`/file.ext`) and depth 2 (`/folder/file.ext`): song title is
//!   derived from the filename heuristic.
//! - depth 3 (`/folder/songFolder/file.ext`): the middle folder name is
//!   trusted verbatim as the song title.
//! - depth 4 and deeper: unsupported nesting, dropped.

use bridge_traits::storage::RemoteEntry;
use tracing::{debug, info};

use crate::naming::extract_base_name;

/// Audio file extensions the band folder is expected to contain.
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".flac", ".m4a", ".ogg"];

/// A song derived from the listing, keyed by its remote folder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongCandidate {
    pub title: String,

    /// Stable identity key matched against persisted songs.
    pub folder_path: String,
}

/// One audio file from the listing. Never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    /// Title of the song this version belongs to
    pub song_title: String,

    /// Full original filename, extension included
    pub version_name: String,

    /// Stable identity key matched against persisted versions.
    pub file_path: String,

    pub file_size: i64,
}

/// Entries dropped during parsing, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedCounts {
    pub folders: usize,
    pub non_audio: usize,
    pub unsupported_depth: usize,
}

/// Result of one parse pass over a full remote listing.
#[derive(Debug, Clone, Default)]
pub struct ParsedStructure {
    pub songs: Vec<SongCandidate>,
    pub versions: Vec<VersionCandidate>,
    pub skipped: SkippedCounts,
}

/// Parse a flat remote listing into song and version candidates.
///
/// Total over all inputs: malformed entries are skipped and counted, never
/// an error. Songs are deduplicated by title, first occurrence keeping its
/// folder-path key; versions are emitted one per audio file.
pub fn parse_structure(entries: &[RemoteEntry]) -> ParsedStructure {
    let mut parsed = ParsedStructure::default();

    for entry in entries {
        if entry.is_folder {
            parsed.skipped.folders += 1;
            continue;
        }

        if !is_audio_file(&entry.path) {
            parsed.skipped.non_audio += 1;
            continue;
        }

        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();

        let (song_title, folder_path) = match segments.as_slice() {
            [filename] => {
                let title = extract_base_name(filename);
                let key = format!("/{}", title);
                (title, key)
            }
            [folder, filename] => {
                let title = extract_base_name(filename);
                let key = format!("/{}/{}", folder, title);
                (title, key)
            }
            [folder, song_folder, _filename] => {
                // Explicit song folder: its name is trusted as-is
                let key = format!("/{}/{}", folder, song_folder);
                ((*song_folder).to_string(), key)
            }
            _ => {
                debug!("Skipping entry with unsupported depth: {}", entry.path);
                parsed.skipped.unsupported_depth += 1;
                continue;
            }
        };

        if !parsed.songs.iter().any(|s| s.title == song_title) {
            parsed.songs.push(SongCandidate {
                title: song_title.clone(),
                folder_path,
            });
        }

        parsed.versions.push(VersionCandidate {
            song_title,
            version_name: entry.name.clone(),
            file_path: entry.path.clone(),
            file_size: entry.size.unwrap_or(0) as i64,
        });
    }

    info!(
        "Parsed listing: {} songs, {} versions ({} folders, {} non-audio, {} too deep skipped)",
        parsed.songs.len(),
        parsed.versions.len(),
        parsed.skipped.folders,
        parsed.skipped.non_audio,
        parsed.skipped.unsupported_depth
    );

    parsed
}

fn is_audio_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
