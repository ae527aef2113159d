//! Directory entry descriptors.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry inside a browsable directory.
///
/// The middleware never inspects these beyond ordering; they are handed to
/// the [`ContentFormatter`](crate::ContentFormatter) as-is.
#[derive(Debug, Clone, Serialize)]
pub struct DirEntry {
    /// Entry name, without any path components.
    pub name: String,
    /// Whether the entry is a file or a nested directory.
    pub kind: EntryKind,
    /// Size in bytes. `None` for directories.
    pub size: Option<u64>,
    /// Last modification time, when the underlying source exposes one.
    pub modified: Option<DateTime<Utc>>,
}
