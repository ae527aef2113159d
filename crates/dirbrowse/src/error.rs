//! Configuration error types.

use thiserror::Error;

/// Errors raised while finalizing directory browsing options.
///
/// These are startup-time failures: none of them can occur once a
/// [`DirectoryBrowser`](crate::DirectoryBrowser) has been constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No formatter was supplied. There is no default for rendering.
    #[error("directory browsing requires a content formatter")]
    MissingFormatter,

    /// The mount path is neither empty nor `/`-prefixed.
    #[error("mount path must be empty or begin with '/': {0:?}")]
    InvalidMountPath(String),
}
