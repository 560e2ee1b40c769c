//! Static files under `/public/`

use std::path::{Component, Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::AppState;

/// Serve a file from the configured public directory
pub async fn public_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(file) = resolve(&state.public_dir, &path) else {
        warn!(path = %path, "Rejected asset path");
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(err) => {
            debug!(file = %file.display(), error = %err, "Asset not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Join a request path onto the public directory, refusing anything that
/// could escape it
pub fn resolve(root: &FsPath, request_path: &str) -> Option<PathBuf> {
    let relative = FsPath::new(request_path);
    let mut resolved = root.to_path_buf();
    let mut depth = 0;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    (depth > 0).then_some(resolved)
}

pub fn content_type(path: &FsPath) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
