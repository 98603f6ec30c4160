//! Route handlers for the HTTP surface.

pub mod assets;
pub mod health;
pub mod stream;
pub mod streaming_helpers;
pub mod videos;
pub mod ws;
