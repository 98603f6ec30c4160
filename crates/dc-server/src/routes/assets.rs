//! Static asset hosting for the web UI and the receiver UI.
//!
//! Requested paths are resolved under a fixed root. Anything that is not a
//! plain relative path, or that canonicalizes outside the root (for example
//! through a symlink), is reported as a missing asset.

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::extract::{Path as UrlPath, Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::context::AppContext;
use crate::error::AppError;

const INDEX_FILE: &str = "index.html";

/// Map `requested` to an existing regular file under `root`.
///
/// An empty request means the root's `index.html`.
pub fn resolve_asset(root: &Path, requested: &str) -> dc_core::Result<PathBuf> {
    let not_found = || dc_core::Error::not_found("asset", requested);
    let escape = || dc_core::Error::PathEscape {
        requested: requested.to_owned(),
    };

    let mut relative = PathBuf::new();
    for component in Path::new(requested.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(escape())
            }
        }
    }
    if relative.as_os_str().is_empty() {
        relative.push(INDEX_FILE);
    }

    let root = root.canonicalize().map_err(|_| not_found())?;
    let full = root.join(&relative).canonicalize().map_err(|_| not_found())?;

    if !full.starts_with(&root) {
        return Err(escape());
    }
    if !full.is_file() {
        return Err(not_found());
    }

    Ok(full)
}

async fn serve_asset(
    root: PathBuf,
    requested: String,
    request: Request,
) -> Result<Response, AppError> {
    let path = tokio::task::spawn_blocking(move || resolve_asset(&root, &requested))
        .await
        .map_err(|e| dc_core::Error::Internal(format!("spawn_blocking join error: {e}")))??;

    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new).into_response())
}

/// GET /receiver, /receiver/
pub async fn receiver_index(
    State(ctx): State<AppContext>,
    request: Request,
) -> Result<Response, AppError> {
    serve_asset(ctx.receiver_dir().to_path_buf(), String::new(), request).await
}

/// GET /receiver/{*path}
pub async fn receiver_asset(
    State(ctx): State<AppContext>,
    UrlPath(path): UrlPath<String>,
    request: Request,
) -> Result<Response, AppError> {
    serve_asset(ctx.receiver_dir().to_path_buf(), path, request).await
}

/// GET /, /index.html
pub async fn web_index(
    State(ctx): State<AppContext>,
    request: Request,
) -> Result<Response, AppError> {
    serve_asset(ctx.web_dir().to_path_buf(), String::new(), request).await
}

/// GET /{*path}
pub async fn web_asset(
    State(ctx): State<AppContext>,
    UrlPath(path): UrlPath<String>,
    request: Request,
) -> Result<Response, AppError> {
    serve_asset(ctx.web_dir().to_path_buf(), path, request).await
}
