//! Directory browsing middleware for axum.
//!
//! Intercepts GET and HEAD requests under a configured mount path and, when
//! the path names an existing directory, renders a listing of its contents
//! via a pluggable formatter. Everything else falls through to the rest of
//! the router.

pub mod entry;
pub mod error;
pub mod formatter;
pub mod middleware;
pub mod options;
pub mod source;

pub use entry::{DirEntry, EntryKind};
pub use error::ConfigError;
pub use formatter::ContentFormatter;
pub use middleware::browse_directory;
pub use options::{DirectoryBrowseOptions, DirectoryBrowser};
pub use source::{ContentSource, LocalContentSource};
