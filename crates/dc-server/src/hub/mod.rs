//! Control hub: relays playback commands from controllers to displays.
//!
//! ```text
//! receiver ──ws──► Session(Display) ─┐
//!                                    ├─► HubRegistry (displays, attachments)
//! sender ────ws──► Session(Controller)┘        │
//!                                              └─► display outbound queue
//! ```
//!
//! - [`protocol`]: inbound classification and outbound frames
//! - [`registry`]: the shared display/attachment state
//! - [`outbound`]: bounded per-connection send queues
//! - [`session`]: per-connection role state machine
//! - [`connection`]: WebSocket reader/writer plumbing

pub mod connection;
pub mod error;
pub mod outbound;
pub mod protocol;
pub mod registry;
pub mod session;

pub use error::HubError;
pub use outbound::{Outbound, OUTBOUND_CAPACITY};
pub use protocol::{ClientMessage, CommandKind, DisplaySummary, ServerMessage};
pub use registry::HubRegistry;
pub use session::{Flow, Role, Session};
