//! Per-connection session state machine.
//!
//! A session starts `Unestablished`; its first frame makes it either a
//! `Display` (on `register`) or a `Controller` (anything else, which is then
//! handled under controller rules). The role never changes afterwards.
//! `Closed` is terminal: [`Session::close`] performs the registry teardown
//! once, and `Drop` calls it so every exit path of the connection task is
//! covered.

use std::sync::Arc;

use dc_core::{DisplayId, SessionId};

use super::error::HubError;
use super::protocol::{ClientMessage, ServerMessage};
use super::outbound::Outbound;
use super::registry::HubRegistry;

/// Role of a connection in the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Unestablished,
    Display(DisplayId),
    Controller,
    Closed,
}

/// What the connection loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// Protocol state for one control connection.
pub struct Session {
    id: SessionId,
    role: Role,
    hub: Arc<HubRegistry>,
    tx: Outbound,
}

impl Session {
    /// Start an unestablished session that replies through `tx`.
    pub fn new(hub: Arc<HubRegistry>, tx: Outbound) -> Self {
        Self {
            id: SessionId::new(),
            role: Role::Unestablished,
            hub,
            tx,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Handle one inbound text frame.
    pub fn handle_text(&mut self, text: &str) -> Flow {
        if self.role == Role::Closed {
            return Flow::Close;
        }

        let message = match ClientMessage::parse(text) {
            Ok(m) => m,
            Err(e) => return self.fail(e),
        };

        match self.role {
            Role::Unestablished => match message {
                ClientMessage::Register { name } => {
                    // The registry queues the `registered` ack itself.
                    let id = self.hub.register(&name, self.tx.clone());
                    self.role = Role::Display(id);
                }
                other => {
                    self.role = Role::Controller;
                    tracing::debug!(session_id = %self.id, "Session established as controller");
                    self.handle_controller(other);
                }
            },
            Role::Controller => self.handle_controller(message),
            Role::Display(id) => {
                tracing::debug!(session_id = %self.id, display_id = %id, ?message, "Ignoring frame from display");
            }
            Role::Closed => return Flow::Close,
        }

        Flow::Continue
    }

    /// Reject a frame the transport could not deliver as text.
    pub fn reject(&mut self, reason: &str) -> Flow {
        self.fail(HubError::Malformed(reason.to_owned()))
    }

    fn fail(&mut self, err: HubError) -> Flow {
        self.send(ServerMessage::error(&err));
        if err.is_fatal() {
            tracing::warn!(session_id = %self.id, "Closing session: {err}");
            Flow::Close
        } else {
            Flow::Continue
        }
    }

    fn handle_controller(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::ListDisplays => {
                let displays = self.hub.list();
                self.send(ServerMessage::Displays { displays });
            }
            ClientMessage::Attach { display_id } => {
                let result = display_id
                    .parse::<DisplayId>()
                    .map_err(|_| HubError::DisplayNotFound(display_id.clone()))
                    .and_then(|id| {
                        self.hub.attach(self.id, id, self.tx.clone()).map(|()| id)
                    });
                match result {
                    Ok(id) => self.send(ServerMessage::Attached { display_id: id }),
                    Err(e) => self.send(ServerMessage::error(&e)),
                }
            }
            ClientMessage::Command { kind, raw } => {
                if let Err(e) = self.hub.forward(self.id, &raw) {
                    tracing::debug!(session_id = %self.id, command = kind.as_str(), "Command rejected: {e}");
                    self.send(ServerMessage::error(&e));
                }
            }
            ClientMessage::Register { .. } => {
                self.send(ServerMessage::Error {
                    message: "register must be the first message".into(),
                });
            }
            ClientMessage::Unknown { message_type } => {
                self.send(ServerMessage::error(&HubError::UnknownType(message_type)));
            }
        }
    }

    fn send(&self, message: ServerMessage) {
        if let Err(e) = self.tx.send(message.to_text()) {
            tracing::trace!(session_id = %self.id, "Reply dropped: {e}");
        }
    }

    /// Tear the session down. Idempotent.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.role, Role::Closed) {
            Role::Display(id) => {
                self.hub.unregister(id);
            }
            Role::Controller => {
                self.hub.detach(self.id);
            }
            Role::Unestablished | Role::Closed => {}
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
