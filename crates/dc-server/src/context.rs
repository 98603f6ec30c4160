//! Application context shared across all route handlers via Axum state.

use std::path::Path;
use std::sync::Arc;

use dc_core::config::Config;

use crate::hub::HubRegistry;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Display registry and controller attachments for `/ws`.
    pub hub: Arc<HubRegistry>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            hub: Arc::new(HubRegistry::new()),
        }
    }

    /// Directory scanned for the video library.
    pub fn media_root(&self) -> &Path {
        &self.config.media.path
    }

    pub fn web_dir(&self) -> &Path {
        &self.config.server.web_dir
    }

    pub fn receiver_dir(&self) -> &Path {
        &self.config.server.receiver_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn clones_share_the_hub() {
        let ctx = AppContext::new(Config::default());
        let other = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.hub, &other.hub));
        assert_eq!(other.media_root(), PathBuf::from("media"));
    }
}
