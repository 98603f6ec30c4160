//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a temporary media directory plus
//! web and receiver asset trees, and builds an [`AppContext`] over them. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level and WebSocket testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use tempfile::TempDir;

use dc_core::config::Config;
use dc_server::context::AppContext;
use dc_server::router::build_router;

pub const WEB_INDEX: &str = "<html><body>web</body></html>";
pub const RECEIVER_INDEX: &str = "<html><body>receiver</body></html>";

/// Test harness wrapping an [`AppContext`] backed by temporary directories.
pub struct TestHarness {
    pub ctx: AppContext,
    root: TempDir,
}

impl TestHarness {
    /// Create a harness with an empty media directory and populated UI trees.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("failed to create temp dir");
        let media = root.path().join("media");
        let web = root.path().join("web");
        let receiver = root.path().join("receiver");

        std::fs::create_dir(&media).unwrap();
        std::fs::create_dir_all(web.join("css")).unwrap();
        std::fs::create_dir(&receiver).unwrap();
        std::fs::write(web.join("index.html"), WEB_INDEX).unwrap();
        std::fs::write(web.join("css/app.css"), "body { margin: 0 }").unwrap();
        std::fs::write(receiver.join("index.html"), RECEIVER_INDEX).unwrap();
        std::fs::write(receiver.join("receiver.js"), "// receiver").unwrap();
        // Sits next to the asset roots so traversal tests have a real target.
        std::fs::write(root.path().join("secret.txt"), "top secret").unwrap();

        let mut config = Config::default();
        config.media.path = media;
        config.server.web_dir = web;
        config.server.receiver_dir = receiver;

        Self {
            ctx: AppContext::new(config),
            root,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.app();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Router over this harness's context, for `oneshot` requests.
    pub fn app(&self) -> Router {
        build_router(self.ctx.clone())
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn media_dir(&self) -> &Path {
        self.ctx.media_root()
    }

    /// Write a file into the media directory.
    pub fn add_media(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.media_dir().join(name);
        std::fs::write(&path, data).expect("failed to write media file");
        path
    }
}

/// Deterministic, non-repeating-looking payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
