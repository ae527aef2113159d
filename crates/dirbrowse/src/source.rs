//! Directory content sources.
//!
//! Provides the trait that resolves a request subpath to directory contents,
//! plus the local-filesystem implementation installed as the default when no
//! source is configured.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use crate::entry::{DirEntry, EntryKind};

/// Source of directory contents.
///
/// Implementations resolve a subpath (relative to wherever the source is
/// rooted) to the ordered entries of that directory. "Does not exist" and
/// "lookup failed" are deliberately collapsed into `None` so the middleware
/// falls through to the rest of the router in both cases.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Resolve `subpath` to its directory contents.
    ///
    /// Returns `None` when the subpath does not name a readable directory.
    async fn directory_contents(&self, subpath: &str) -> Option<Vec<DirEntry>>;
}

/// Content source backed by the local filesystem.
#[derive(Debug)]
pub struct LocalContentSource {
    root: PathBuf,
}

impl LocalContentSource {
    /// Create a source rooted at `root`. Subpaths are resolved beneath it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request subpath onto a path under the root.
    ///
    /// Rejects subpaths containing parent-directory components so a crafted
    /// URL cannot escape the configured root.
    fn resolve(&self, subpath: &str) -> Option<PathBuf> {
        let relative = Path::new(subpath.trim_matches('/'));
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    debug!(subpath = %subpath, "refusing subpath that escapes the root");
                    return None;
                }
            }
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for LocalContentSource {
    async fn directory_contents(&self, subpath: &str) -> Option<Vec<DirEntry>> {
        let path = self.resolve(subpath)?;

        let mut reader = match fs::read_dir(&path).await {
            Ok(reader) => reader,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "directory lookup failed");
                return None;
            }
        };

        let mut entries = Vec::new();
        loop {
            match reader.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let metadata = entry.metadata().await.ok();
                    let kind = match &metadata {
                        Some(m) if m.is_dir() => EntryKind::Directory,
                        _ => EntryKind::File,
                    };
                    let size = match (&metadata, kind) {
                        (Some(m), EntryKind::File) => Some(m.len()),
                        _ => None,
                    };
                    let modified = metadata
                        .as_ref()
                        .and_then(|m| m.modified().ok())
                        .map(DateTime::<Utc>::from);
                    entries.push(DirEntry {
                        name,
                        kind,
                        size,
                        modified,
                    });
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "directory read failed");
                    return None;
                }
            }
        }

        // Deterministic listing order regardless of readdir order:
        // directories first, then by name.
        entries.sort_by(|a, b| {
            let rank = |e: &DirEntry| match e.kind {
                EntryKind::Directory => 0u8,
                EntryKind::File => 1,
            };
            rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
        });

        Some(entries)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn populated_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        dir
    }

    #[tokio::test]
    async fn lists_directories_first_then_by_name() {
        let root = populated_root();
        let source = LocalContentSource::new(root.path());

        let entries = source.directory_contents("/").await.unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["nested", "a.txt", "b.txt"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].size, Some(2));
        assert!(entries[1].modified.is_some());
    }

    #[tokio::test]
    async fn lists_subdirectories() {
        let root = populated_root();
        std::fs::write(root.path().join("nested/inner.txt"), b"x").unwrap();
        let source = LocalContentSource::new(root.path());

        let entries = source.directory_contents("/nested/").await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "inner.txt");
    }

    #[tokio::test]
    async fn missing_directory_reports_absence() {
        let root = populated_root();
        let source = LocalContentSource::new(root.path());

        assert!(source.directory_contents("/missing/").await.is_none());
    }

    #[tokio::test]
    async fn file_is_not_a_directory() {
        let root = populated_root();
        let source = LocalContentSource::new(root.path());

        assert!(source.directory_contents("/a.txt").await.is_none());
    }

    #[tokio::test]
    async fn rejects_parent_traversal() {
        let root = populated_root();
        // Root the source at the nested directory; "/../" would name the
        // parent, which must not be reachable.
        let source = LocalContentSource::new(root.path().join("nested"));

        assert!(source.directory_contents("/../").await.is_none());
        assert!(source.directory_contents("/../nested/").await.is_none());
    }
}
