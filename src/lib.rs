//! Workspace umbrella crate.
//!
//! Re-exports the individual workspace crates so host applications (the web
//! layer in particular) can depend on `bandaid-core` without wiring each
//! crate individually.

pub use bridge_desktop;
pub use bridge_traits;
pub use core_library;
pub use core_sync;
pub use provider_dropbox;
