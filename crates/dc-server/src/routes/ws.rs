//! WebSocket upgrade for the control hub.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::Response;

use crate::context::AppContext;
use crate::hub::connection;

/// GET /ws
pub async fn control_socket(State(ctx): State<AppContext>, ws: WebSocketUpgrade) -> Response {
    let hub = ctx.hub.clone();
    ws.on_upgrade(move |socket| connection::run(socket, hub))
}
