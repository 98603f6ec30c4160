//! dc-core: shared types, IDs, errors, configuration, and the media library
//! scanner.
//!
//! This crate is the foundational dependency of `dc-server` and the
//! `dancecast` binary. It holds no async code: every operation here is plain
//! blocking I/O that callers move onto a blocking thread when needed.

pub mod config;
pub mod error;
pub mod ids;
pub mod library;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
