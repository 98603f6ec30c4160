//! Axum router construction.
//!
//! Builds the full application router: the library API, range streaming,
//! the control hub upgrade, and the two static UI trees, under the shared
//! middleware layers.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let receiver = Router::new()
        .route("/receiver", get(routes::assets::receiver_index))
        .route("/receiver/", get(routes::assets::receiver_index))
        .route("/receiver/{*path}", get(routes::assets::receiver_asset));

    let web = Router::new()
        .route("/", get(routes::assets::web_index))
        .route("/index.html", get(routes::assets::web_index))
        .route("/{*path}", get(routes::assets::web_asset));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/videos", get(routes::videos::list_videos))
        .route("/videos/{index}", get(routes::stream::stream_video))
        .route("/ws", get(routes::ws::control_socket))
        .merge(receiver)
        .merge(web)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
