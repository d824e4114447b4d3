//! IPTV M3U playlist handling.
//!
//! Parsing is lenient: anything that is not recognised is skipped, and the
//! [`validate`] module is where malformed input gets reported.

pub mod api;
pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;
pub mod uri;
pub mod validate;
pub mod writer;

pub use catalog::{Catalog, UNDEFINED_CATEGORY, sanitize_filename};
pub use error::{PlaylistError, Result};
pub use model::{Group, HttpOptions, Playlist, PlaylistHeader, PlaylistItem, Tvg};
pub use parser::parse;
pub use store::{LoadedPlaylist, PlaylistFile, PlaylistStore};
pub use uri::{is_uri, normalize_url};
pub use validate::ValidationReport;
pub use writer::{EOL, render};
