//! Hub registry: the live displays and controller attachments.
//!
//! All state sits behind a single mutex so registration, attachment, the
//! forwarding lookup and teardown are mutually exclusive. Delivery only
//! enqueues onto a connection's bounded [`Outbound`] queue without waiting,
//! so the lock is never held across an await point or a slow peer.

use std::collections::HashMap;

use dc_core::{DisplayId, SessionId};
use parking_lot::Mutex;

use super::error::HubError;
use super::outbound::Outbound;
use super::protocol::{DisplaySummary, ServerMessage};

struct DisplayEntry {
    name: String,
    /// Registration order, used to keep listings stable.
    seq: u64,
    tx: Outbound,
}

struct Attachment {
    display_id: DisplayId,
    /// The controller's own outbound queue, for `display_gone`.
    tx: Outbound,
}

#[derive(Default)]
struct RegistryState {
    displays: HashMap<DisplayId, DisplayEntry>,
    attachments: HashMap<SessionId, Attachment>,
    next_seq: u64,
}

/// Process-wide registry of displays and attachments.
#[derive(Default)]
pub struct HubRegistry {
    state: Mutex<RegistryState>,
}

impl HubRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display and return its freshly minted identifier.
    ///
    /// The `registered` ack is queued on `tx` under the lock, so it precedes
    /// any command a controller can forward to the new display.
    pub fn register(&self, name: &str, tx: Outbound) -> DisplayId {
        let id = DisplayId::new();
        let mut state = self.state.lock();
        if let Err(e) = tx.send(ServerMessage::Registered { id }.to_text()) {
            tracing::debug!(display_id = %id, "Registration ack not queued: {e}");
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.displays.insert(
            id,
            DisplayEntry {
                name: name.to_owned(),
                seq,
                tx,
            },
        );

        tracing::info!(display_id = %id, name, displays = state.displays.len(), "Display registered");
        id
    }

    /// Remove a display and notify every controller attached to it.
    ///
    /// Returns the number of controllers notified. Removing an unknown id is
    /// a no-op, so a display is torn down at most once.
    pub fn unregister(&self, id: DisplayId) -> usize {
        let mut state = self.state.lock();
        let Some(entry) = state.displays.remove(&id) else {
            return 0;
        };

        let orphaned: Vec<SessionId> = state
            .attachments
            .iter()
            .filter(|(_, a)| a.display_id == id)
            .map(|(session, _)| *session)
            .collect();

        let gone = ServerMessage::DisplayGone { display_id: id }.to_text();
        for session in &orphaned {
            if let Some(attachment) = state.attachments.remove(session) {
                // A closed controller queue just means it is tearing down too.
                let _ = attachment.tx.send(gone.clone());
            }
        }

        tracing::info!(
            display_id = %id,
            name = %entry.name,
            controllers_notified = orphaned.len(),
            "Display unregistered"
        );
        orphaned.len()
    }

    /// Point `session` at `display_id`, replacing any previous attachment.
    pub fn attach(
        &self,
        session: SessionId,
        display_id: DisplayId,
        tx: Outbound,
    ) -> Result<(), HubError> {
        let mut state = self.state.lock();
        if !state.displays.contains_key(&display_id) {
            return Err(HubError::DisplayNotFound(display_id.to_string()));
        }

        let previous = state
            .attachments
            .insert(session, Attachment { display_id, tx })
            .map(|a| a.display_id);

        tracing::info!(session_id = %session, display_id = %display_id, previous = ?previous, "Controller attached");
        Ok(())
    }

    /// Drop the attachment of `session`, returning the display it pointed at.
    pub fn detach(&self, session: SessionId) -> Option<DisplayId> {
        let removed = self
            .state
            .lock()
            .attachments
            .remove(&session)
            .map(|a| a.display_id);

        if let Some(display_id) = removed {
            tracing::debug!(session_id = %session, display_id = %display_id, "Controller detached");
        }
        removed
    }

    /// The display `session` is currently attached to, if any.
    pub fn attachment(&self, session: SessionId) -> Option<DisplayId> {
        self.state
            .lock()
            .attachments
            .get(&session)
            .map(|a| a.display_id)
    }

    /// Relay `payload` from `session` to its attached display.
    ///
    /// Fails with [`HubError::NotAttached`] when the session has no
    /// attachment or the display has gone.
    pub fn forward(&self, session: SessionId, payload: &str) -> Result<DisplayId, HubError> {
        let state = self.state.lock();
        let display_id = state
            .attachments
            .get(&session)
            .map(|a| a.display_id)
            .ok_or(HubError::NotAttached)?;
        let display = state
            .displays
            .get(&display_id)
            .ok_or(HubError::NotAttached)?;

        if let Err(e) = display.tx.send(payload.to_owned()) {
            // The display is going away; its teardown will follow and notify
            // this controller.
            tracing::debug!(display_id = %display_id, "Command dropped: {e}");
        } else {
            tracing::trace!(session_id = %session, display_id = %display_id, "Command forwarded");
        }
        Ok(display_id)
    }

    /// Snapshot of registered displays in registration order.
    pub fn list(&self) -> Vec<DisplaySummary> {
        let state = self.state.lock();
        let mut entries: Vec<(&DisplayId, &DisplayEntry)> = state.displays.iter().collect();
        entries.sort_by_key(|(_, e)| e.seq);
        entries
            .into_iter()
            .map(|(id, e)| DisplaySummary {
                id: *id,
                name: e.name.clone(),
            })
            .collect()
    }

    /// Number of registered displays.
    pub fn display_count(&self) -> usize {
        self.state.lock().displays.len()
    }

    /// Number of controllers with a live attachment.
    pub fn attachment_count(&self) -> usize {
        self.state.lock().attachments.len()
    }
}
