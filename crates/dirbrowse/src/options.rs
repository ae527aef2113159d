//! Directory browsing configuration.
//!
//! Options are assembled mutably, then finalized once into an immutable
//! [`DirectoryBrowser`] before the middleware serves any request. Defaults
//! (the local-filesystem content source) are resolved during finalization,
//! so no request can observe a partially-defaulted configuration.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::formatter::ContentFormatter;
use crate::source::{ContentSource, LocalContentSource};

/// Assembly surface for directory browsing configuration.
pub struct DirectoryBrowseOptions {
    mount_path: String,
    source: Option<Arc<dyn ContentSource>>,
    formatter: Option<Arc<dyn ContentFormatter>>,
}

impl DirectoryBrowseOptions {
    /// Start options for the given mount path (the URL prefix to intercept).
    ///
    /// An empty mount path (or `/`) intercepts every path.
    pub fn new(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            source: None,
            formatter: None,
        }
    }

    /// Use a specific content source instead of the local-filesystem default.
    pub fn with_source(mut self, source: Arc<dyn ContentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the formatter that renders listings. Required.
    pub fn with_formatter(mut self, formatter: Arc<dyn ContentFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Validated, immutable directory browsing configuration.
///
/// Cheap to clone; shared read-only across all in-flight requests.
#[derive(Clone)]
pub struct DirectoryBrowser {
    inner: Arc<Inner>,
}

struct Inner {
    /// Normalized mount path: empty (root) or `/`-prefixed without a
    /// trailing slash.
    mount_path: String,
    source: Arc<dyn ContentSource>,
    formatter: Arc<dyn ContentFormatter>,
}

impl DirectoryBrowser {
    /// Validate options and resolve defaults.
    ///
    /// Fails when no formatter was supplied or the mount path is malformed.
    /// When no content source was supplied, a [`LocalContentSource`] rooted
    /// at `"." + mount_path` is installed.
    pub fn new(options: DirectoryBrowseOptions) -> Result<Self, ConfigError> {
        let mount_path = normalize_mount_path(&options.mount_path)?;

        let formatter = options.formatter.ok_or(ConfigError::MissingFormatter)?;

        let source = options
            .source
            .unwrap_or_else(|| Arc::new(LocalContentSource::new(format!(".{mount_path}"))));

        Ok(Self {
            inner: Arc::new(Inner {
                mount_path,
                source,
                formatter,
            }),
        })
    }

    pub(crate) fn mount_path(&self) -> &str {
        &self.inner.mount_path
    }

    pub(crate) fn source(&self) -> &dyn ContentSource {
        self.inner.source.as_ref()
    }

    pub(crate) fn formatter(&self) -> &dyn ContentFormatter {
        self.inner.formatter.as_ref()
    }
}

impl std::fmt::Debug for DirectoryBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryBrowser")
            .field("mount_path", &self.inner.mount_path)
            .finish_non_exhaustive()
    }
}

/// Normalize a mount path to its matching form: empty for root, otherwise
/// `/`-prefixed with no trailing slash.
fn normalize_mount_path(raw: &str) -> Result<String, ConfigError> {
    if raw.is_empty() || raw == "/" {
        return Ok(String::new());
    }
    if !raw.starts_with('/') {
        return Err(ConfigError::InvalidMountPath(raw.to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::{IntoResponse, Response};

    use crate::entry::DirEntry;

    struct NullFormatter;

    #[async_trait::async_trait]
    impl ContentFormatter for NullFormatter {
        async fn generate_content(
            &self,
            _request: &Request<Body>,
            _entries: Vec<DirEntry>,
        ) -> Response {
            ().into_response()
        }
    }

    #[test]
    fn missing_formatter_is_rejected() {
        let err = DirectoryBrowser::new(DirectoryBrowseOptions::new("/files")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFormatter));
    }

    #[test]
    fn relative_mount_path_is_rejected() {
        let options =
            DirectoryBrowseOptions::new("files").with_formatter(Arc::new(NullFormatter));
        let err = DirectoryBrowser::new(options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMountPath(_)));
    }

    #[test]
    fn missing_source_installs_local_default() {
        let options =
            DirectoryBrowseOptions::new("/files").with_formatter(Arc::new(NullFormatter));
        let browser = DirectoryBrowser::new(options).unwrap();
        assert_eq!(browser.mount_path(), "/files");
    }

    #[test]
    fn mount_path_is_normalized() {
        assert_eq!(normalize_mount_path("/files/").unwrap(), "/files");
        assert_eq!(normalize_mount_path("/files").unwrap(), "/files");
        assert_eq!(normalize_mount_path("/").unwrap(), "");
        assert_eq!(normalize_mount_path("").unwrap(), "");
    }
}
