//! Direct video streaming with HTTP range request support.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::streaming_helpers::serve_file_streaming;

/// GET /videos/{index}
///
/// `index` is the video's position in the current sorted listing. Anything
/// that is not a non-negative integer, or is past the end, is a 404.
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Path(raw_index): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let index: usize = raw_index
        .parse()
        .map_err(|_| dc_core::Error::not_found("video", &raw_index))?;

    let root = ctx.media_root().to_path_buf();
    let entry = tokio::task::spawn_blocking(move || dc_core::library::resolve(&root, index))
        .await
        .map_err(|e| dc_core::Error::Internal(format!("spawn_blocking join error: {e}")))??;

    let range_header = headers.get(header::RANGE).and_then(|v| v.to_str().ok());

    tracing::debug!(
        index,
        file = %entry.path.display(),
        range = range_header.unwrap_or("-"),
        "Streaming video"
    );

    Ok(serve_file_streaming(&entry.path, range_header).await?)
}
