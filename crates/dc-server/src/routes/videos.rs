//! Library listing route.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

/// One entry of the `/api/videos` listing.
#[derive(Debug, Serialize)]
pub struct VideoItem {
    pub name: String,
    /// URL the file is served from, e.g. `/videos/0`.
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<VideoItem>,
}

/// GET /api/videos
///
/// Rescans the media directory on every call. An absent directory lists as
/// empty.
pub async fn list_videos(
    State(ctx): State<AppContext>,
) -> Result<Json<VideoListResponse>, AppError> {
    let root = ctx.media_root().to_path_buf();
    let entries = tokio::task::spawn_blocking(move || dc_core::library::list_videos(&root))
        .await
        .map_err(|e| dc_core::Error::Internal(format!("spawn_blocking join error: {e}")))?;

    let videos = entries
        .into_iter()
        .map(|entry| VideoItem {
            path: entry.url_path(),
            name: entry.name,
        })
        .collect();

    Ok(Json(VideoListResponse { videos }))
}
