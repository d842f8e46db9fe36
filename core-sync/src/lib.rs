//! # Band Folder Sync
//!
//! One-directional reconciliation of the band's remote Dropbox folder into
//! the local library, plus the temporary-link cache backing audio playback.
//!
//! ## Overview
//!
//! A sync pass lists the full remote tree, derives song and version
//! candidates from the folder structure, and reconciles them against the
//! database in a single transaction; anything persisted but absent from the
//! listing is deleted. This is full-replace reconciliation, not incremental
//! diffing via change cursors.
//!
//! ## Components
//!
//! - **Name Extractor** (`naming`): derives canonical song titles from raw
//!   filenames (best-effort heuristic)
//! - **Structure Parser** (`parser`): classifies listing entries by depth
//!   into song/version candidates
//! - **Reconciler** (`reconciler`): atomic upsert, stale cleanup, and
//!   notification broadcast
//! - **Temporary Link Cache** (`links`): bounded TTL cache over the
//!   provider's link endpoint
//! - **Sync Service** (`service`): orchestrator facade consumed by the web
//!   layer

pub mod config;
pub mod error;
pub mod links;
pub mod naming;
pub mod parser;
pub mod reconciler;
pub mod service;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use links::TempLinkCache;
pub use naming::extract_base_name;
pub use parser::{parse_structure, ParsedStructure, SkippedCounts, SongCandidate, VersionCandidate};
pub use reconciler::{Reconciler, SyncResult};
pub use service::SyncService;
