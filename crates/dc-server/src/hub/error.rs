//! Control hub error types.

/// Error type for hub operations.
///
/// `DisplayNotFound`, `NotAttached` and `UnknownType` are reported back to
/// the controller as `error` messages and leave the connection open.
/// `Malformed` ends the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    /// The requested display is not registered.
    #[error("display not found: {0}")]
    DisplayNotFound(String),

    /// A command arrived from a controller with no live attachment.
    #[error("not attached to a display")]
    NotAttached,

    /// The message parsed but its type is not part of the controller protocol.
    #[error("unknown message type: {0}")]
    UnknownType(String),

    /// The payload is not a JSON object with a string `type` field.
    #[error("malformed message: {0}")]
    Malformed(String),
}

impl HubError {
    /// Whether the session must be closed after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HubError::Malformed(_))
    }
}
