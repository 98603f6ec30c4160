//! Shared streaming helpers: range parsing, content-type guessing, and
//! chunked file serving via `ReaderStream`.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Read size for streamed bodies.
pub const STREAM_CHUNK_SIZE: usize = 256 * 1024;

/// An inclusive byte span within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes in the span.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Evaluate a `Range` header against a file of `file_size` bytes.
///
/// - `Ok(None)`: no header, or not in the `bytes=` unit; serve the whole file.
/// - `Ok(Some(range))`: a satisfiable span, end clamped to the last byte.
/// - `Err(InvalidRange)`: unparseable, `start > end`, or nothing to serve.
///
/// An omitted start means 0 and an omitted end means the last byte, so
/// `bytes=-500` reads the first 501 bytes rather than a suffix.
pub fn parse_range_header(
    value: Option<&str>,
    file_size: u64,
) -> dc_core::Result<Option<ByteRange>> {
    let Some(value) = value.map(str::trim) else {
        return Ok(None);
    };
    let is_bytes_unit = value
        .get(..6)
        .map(|unit| unit.eq_ignore_ascii_case("bytes="))
        .unwrap_or(false);
    if !is_bytes_unit {
        return Ok(None);
    }

    let ranges = value[6..].trim();
    let (start_str, end_str) = ranges.split_once('-').unwrap_or((ranges, ""));
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    let start = if start_str.is_empty() {
        0
    } else {
        start_str.parse::<u64>().map_err(|_| {
            dc_core::Error::invalid_range(format!("bad start offset {start_str:?}"), file_size)
        })?
    };

    let Some(last) = file_size.checked_sub(1) else {
        return Err(dc_core::Error::invalid_range("file is empty", file_size));
    };

    let end = if end_str.is_empty() {
        last
    } else {
        end_str.parse::<u64>().map_err(|_| {
            dc_core::Error::invalid_range(format!("bad end offset {end_str:?}"), file_size)
        })?
    };

    if start > end {
        return Err(dc_core::Error::invalid_range(
            format!("start {start} is after end {end}"),
            file_size,
        ));
    }

    let end = end.min(last);
    if start > end {
        return Err(dc_core::Error::invalid_range(
            format!("start {start} is beyond the last byte {last}"),
            file_size,
        ));
    }

    Ok(Some(ByteRange { start, end }))
}

/// Guess the MIME type from the file extension.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

/// Stream `length` bytes of `reader` starting at `start`.
///
/// Reads go through `take(length)` in [`STREAM_CHUNK_SIZE`] chunks, so a
/// source that runs out early simply ends the body with the bytes it had.
pub async fn span_body<R>(mut reader: R, start: u64, length: u64) -> std::io::Result<Body>
where
    R: AsyncRead + AsyncSeek + Unpin + Send + 'static,
{
    if start > 0 {
        reader.seek(std::io::SeekFrom::Start(start)).await?;
    }
    let stream = ReaderStream::with_capacity(reader.take(length), STREAM_CHUNK_SIZE);
    Ok(Body::from_stream(stream))
}

/// Serve a file using chunked streaming via `ReaderStream`.
///
/// Reads are done in [`STREAM_CHUNK_SIZE`] chunks so memory stays bounded
/// regardless of file size. A file that turns out shorter than its metadata
/// claimed ends the body early instead of erroring.
pub async fn serve_file_streaming(
    file_path: &std::path::Path,
    range_header: Option<&str>,
) -> dc_core::Result<Response> {
    let metadata = tokio::fs::metadata(file_path)
        .await
        .map_err(|_| dc_core::Error::not_found("file", file_path.display()))?;

    let file_size = metadata.len();
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let content_type = guess_content_type(&file_name);

    let range = parse_range_header(range_header, file_size)?;

    let file = tokio::fs::File::open(file_path)
        .await
        .map_err(|_| dc_core::Error::not_found("file", file_path.display()))?;

    match range {
        Some(range) => {
            let length = range.len();
            let body = span_body(file, range.start, length).await?;

            tracing::debug!(
                file = %file_path.display(),
                start = range.start,
                end = range.end,
                size = file_size,
                "Serving partial content"
            );

            Ok((
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_RANGE,
                        format!("bytes {}-{}/{file_size}", range.start, range.end),
                    ),
                    (header::CONTENT_LENGTH, length.to_string()),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
                body,
            )
                .into_response())
        }
        None => {
            let body = span_body(file, 0, file_size).await?;

            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (header::CONTENT_LENGTH, file_size.to_string()),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
                body,
            )
                .into_response())
        }
    }
}
