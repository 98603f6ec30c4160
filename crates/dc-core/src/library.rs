//! Media library scanning and ordinal resolution.
//!
//! Videos are never stored: every listing and every serve re-scans the media
//! directory, keeps regular files with an allow-listed extension, and sorts
//! them by file name. A video's identity is its position in that sequence.
//! Both [`scan_videos`] and [`resolve`] go through the same scan so the
//! ordinal-to-file mapping is identical for a given directory state.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// File extensions (lowercase, without dot) recognised as videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "mov", "m4v"];

/// One video in the library, addressed by its ordinal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    /// Zero-based position in the sorted listing.
    pub index: usize,
    /// File name as shown to clients.
    pub name: String,
    /// Absolute or root-relative path on disk.
    pub path: PathBuf,
}

impl VideoEntry {
    /// URL path under which this entry is served.
    pub fn url_path(&self) -> String {
        format!("/videos/{}", self.index)
    }
}

/// Whether `path` carries one of the [`VIDEO_EXTENSIONS`] (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Scan `root` and return the sorted video listing.
///
/// Fails with an I/O error when the directory cannot be read.
pub fn scan_videos(root: &Path) -> Result<Vec<VideoEntry>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
        };
        let path = entry.path();
        // `is_file` follows symlinks, matching what a later open() will see.
        if path.is_file() && is_video_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, path)| VideoEntry {
            index,
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
        })
        .collect())
}

/// Listing variant used by the API: an absent or unreadable media directory
/// is an empty library rather than an error.
pub fn list_videos(root: &Path) -> Vec<VideoEntry> {
    match scan_videos(root) {
        Ok(videos) => videos,
        Err(e) => {
            tracing::debug!("Media directory {} not readable: {e}", root.display());
            Vec::new()
        }
    }
}

/// Resolve the video at ordinal `index`.
///
/// Fails with [`Error::NotFound`] when the index is out of bounds or the
/// directory is absent/unreadable.
pub fn resolve(root: &Path, index: usize) -> Result<VideoEntry> {
    let videos = scan_videos(root).map_err(|_| Error::not_found("video", index))?;
    videos
        .into_iter()
        .nth(index)
        .ok_or_else(|| Error::not_found("video", index))
}
