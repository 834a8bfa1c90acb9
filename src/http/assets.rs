//! Operator UI assets.
//!
//! Files are read from a directory on disk. The UI root resolves to
//! `index.html`; traversal outside the directory is rejected by `ServeDir`.

use axum::{
    body::Body,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Static asset source rooted at the UI directory.
#[derive(Clone)]
pub struct UiAssets {
    dir: ServeDir,
}

impl UiAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: ServeDir::new(root).append_index_html_on_directories(true),
        }
    }

    /// Serve `relative` (path below the UI root) for the given request.
    pub async fn serve(&self, relative: &str, req: Request<Body>) -> Response {
        let uri: Uri = match format!("/{relative}").parse() {
            Ok(uri) => uri,
            Err(_) => return StatusCode::NOT_FOUND.into_response(),
        };

        let (mut parts, body) = req.into_parts();
        parts.uri = uri;

        match self.dir.clone().oneshot(Request::from_parts(parts, body)).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}
