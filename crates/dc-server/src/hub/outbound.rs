//! Bounded per-connection outbound queue.
//!
//! Every connection's writer task drains one of these. Enqueueing never
//! waits: a queue that is full means the peer has stopped reading, which is
//! treated like a transport failure. The overflow token is cancelled and the
//! connection loop tears the session down.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

/// Frames a connection may have queued before it is considered stalled.
pub const OUTBOUND_CAPACITY: usize = 256;

/// Why a frame could not be queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The peer stopped reading; its connection is being torn down.
    #[error("outbound queue full")]
    Full,
    /// The writer task has already gone.
    #[error("outbound queue closed")]
    Closed,
}

/// Sending half of a connection's outbound queue.
#[derive(Debug, Clone)]
pub struct Outbound {
    tx: mpsc::Sender<String>,
    overflow: CancellationToken,
}

impl Outbound {
    /// Create a queue holding at most `capacity` frames.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        let outbound = Self {
            tx,
            overflow: CancellationToken::new(),
        };
        (outbound, rx)
    }

    /// Queue a text frame without waiting.
    pub fn send(&self, frame: String) -> Result<(), SendError> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                if !self.overflow.is_cancelled() {
                    tracing::warn!("Outbound queue full, dropping connection");
                    self.overflow.cancel();
                }
                Err(SendError::Full)
            }
            Err(TrySendError::Closed(_)) => Err(SendError::Closed),
        }
    }

    /// Token cancelled the first time this queue overflows.
    ///
    /// Holding the token does not keep the queue open.
    pub fn overflow_token(&self) -> CancellationToken {
        self.overflow.clone()
    }
}
