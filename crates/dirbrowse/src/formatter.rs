//! Content formatter seam.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::entry::DirEntry;

/// Renders a directory's entries into an HTTP response.
///
/// Rendering (HTML, JSON, plain text, ...) is owned entirely by
/// implementations; the middleware hands over the request and the entries
/// and returns whatever the formatter produces, unmodified.
#[async_trait]
pub trait ContentFormatter: Send + Sync {
    /// Produce the response for a directory listing.
    async fn generate_content(
        &self,
        request: &Request<Body>,
        entries: Vec<DirEntry>,
    ) -> Response;
}
