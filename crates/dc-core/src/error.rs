//! Unified error type for dancecast.
//!
//! Library, range and asset failures all funnel into [`Error`], which carries
//! enough context for API handlers to derive an HTTP status code via
//! [`Error::http_status`].

use std::fmt;

/// Unified error type covering the HTTP-facing failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "video", "asset").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A static asset request resolved outside of its root.
    ///
    /// Rendered exactly like a missing asset so the real location never
    /// leaks to the client.
    #[error("asset not found: {requested}")]
    PathEscape {
        /// The path as the client requested it.
        requested: String,
    },

    /// The `Range` header was malformed or cannot be satisfied.
    #[error("Invalid range: {reason}")]
    InvalidRange {
        /// Why the range was rejected.
        reason: String,
        /// Size of the file the range was evaluated against.
        size: u64,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::PathEscape { .. } => 404,
            Error::InvalidRange { .. } => 416,
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::InvalidRange`].
    pub fn invalid_range(reason: impl Into<String>, size: u64) -> Self {
        Error::InvalidRange {
            reason: reason.into(),
            size,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
