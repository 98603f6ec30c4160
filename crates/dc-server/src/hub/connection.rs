//! WebSocket transport for a control session.
//!
//! Each connection runs a reader loop feeding [`Session`] and a writer task
//! draining the session's bounded outbound queue into the socket. The hub
//! only ever enqueues, so a slow peer never holds up anyone else; a peer
//! that lets its queue fill up is disconnected.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};

use super::outbound::{Outbound, OUTBOUND_CAPACITY};
use super::registry::HubRegistry;
use super::session::{Flow, Session};

/// How long queued frames may take to flush after the reader stops.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Drive one upgraded `/ws` connection until it closes.
pub async fn run(socket: WebSocket, hub: Arc<HubRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = Outbound::channel(OUTBOUND_CAPACITY);
    let overflow = tx.overflow_token();

    let mut session = Session::new(hub, tx);
    let session_id = session.id();
    tracing::debug!(session_id = %session_id, "Control connection opened");

    let mut writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if let Err(e) = sink.send(Message::Text(text.into())).await {
                tracing::debug!(session_id = %session_id, "Write failed: {e}");
                return;
            }
        }
        // Every sender is gone: the session has been torn down.
        let _ = sink.send(Message::Close(None)).await;
        let _ = sink.close().await;
    });

    loop {
        let frame = tokio::select! {
            frame = stream.next() => frame,
            _ = overflow.cancelled() => break,
        };
        let Some(frame) = frame else {
            break;
        };

        let flow = match frame {
            Ok(Message::Text(text)) => session.handle_text(text.as_str()),
            Ok(Message::Binary(_)) => session.reject("binary frames are not supported"),
            Ok(Message::Close(_)) => Flow::Close,
            // Pings are answered by the transport.
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => Flow::Continue,
            Err(e) => {
                tracing::debug!(session_id = %session_id, "Transport error: {e}");
                Flow::Close
            }
        };
        if flow == Flow::Close {
            break;
        }
    }

    let role = session.role();
    drop(session);
    tracing::debug!(session_id = %session_id, ?role, "Control connection closed");

    // A stalled peer will not drain its backlog; don't wait for it.
    if overflow.is_cancelled() {
        writer.abort();
        return;
    }

    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut writer)
        .await
        .is_err()
    {
        writer.abort();
    }
}
