//! Directory browsing middleware.
//!
//! Checks whether a request targets a configured browsable directory. If so,
//! either redirects to the slash-terminated URL or delegates rendering to
//! the configured formatter; otherwise the request continues down the
//! router.

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::options::DirectoryBrowser;

/// Middleware serving directory listings under a mount path.
///
/// Wire it with [`axum::middleware::from_fn_with_state`]:
///
/// ```ignore
/// let app = Router::new()
///     .fallback(other_handler)
///     .layer(axum::middleware::from_fn_with_state(browser, browse_directory));
/// ```
///
/// Only GET and HEAD requests are intercepted. A matched directory whose URL
/// lacks a trailing slash is answered with a 301 redirect to the
/// slash-terminated URL, so relative links inside the rendered listing
/// resolve against the directory rather than its parent.
pub async fn browse_directory(
    State(browser): State<DirectoryBrowser>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method();
    if method != Method::GET && method != Method::HEAD {
        return next.run(request).await;
    }

    let path = request.uri().path().to_owned();
    let Some(subpath) = match_mount(browser.mount_path(), &path) else {
        return next.run(request).await;
    };

    // "No such directory" and "lookup failed" both fall through; the source
    // reports either as absence.
    let Some(entries) = browser.source().directory_contents(&subpath).await else {
        debug!(path = %path, subpath = %subpath, "no browsable directory, continuing");
        return next.run(request).await;
    };

    if !path.ends_with('/') {
        // Inside a nested router the OriginalUri extension carries the
        // external path, including the prefix the router stripped.
        let external = request
            .extensions()
            .get::<OriginalUri>()
            .map_or(path.as_str(), |uri| uri.0.path());
        let location = format!("{external}/");
        debug!(path = %path, location = %location, "redirecting to directory URL");
        return (StatusCode::MOVED_PERMANENTLY, [("Location", location)]).into_response();
    }

    debug!(path = %path, entries = entries.len(), "rendering directory listing");
    browser.formatter().generate_content(&request, entries).await
}

/// Match a request path against a mount path as a directory-style prefix.
///
/// Returns the subpath below the mount on a match: the mount itself yields
/// `/`, deeper paths keep their remainder (including any trailing slash).
/// Segment boundaries are respected, so `/filesystem` does not match a
/// `/files` mount.
fn match_mount(mount: &str, path: &str) -> Option<String> {
    if mount.is_empty() {
        return Some(if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        });
    }
    let remainder = path.strip_prefix(mount)?;
    if remainder.is_empty() {
        return Some("/".to_string());
    }
    remainder
        .starts_with('/')
        .then(|| remainder.to_string())
}
