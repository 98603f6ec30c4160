//! dc-server: HTTP surface and control hub for dancecast.
//!
//! - Library listing and byte-range video streaming
//! - WebSocket hub relaying playback commands from controllers to displays
//! - Static hosting for the web UI and the receiver UI
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod hub;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use dc_core::config::Config;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the dancecast server.
///
/// Builds the [`AppContext`] and serves the router until a shutdown signal
/// is received or `cancel` is triggered.
pub async fn start(config: Config, cancel: CancellationToken) -> dc_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| dc_core::Error::Internal(format!("Invalid server address: {e}")))?;

    tracing::info!(
        media = %config.media.path.display(),
        web = %config.server.web_dir.display(),
        receiver = %config.server.receiver_dir.display(),
        "Serving library"
    );

    let ctx = AppContext::new(config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| dc_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C, SIGTERM, or cancellation of the token.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
