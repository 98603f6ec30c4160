//! Wire protocol for the `/ws` control connection.
//!
//! Every frame is a JSON object whose `type` field selects the schema.
//! Inbound frames are classified into [`ClientMessage`]; playback commands
//! keep their original text so they can be relayed to a display byte for
//! byte. Outbound frames are [`ServerMessage`].

use dc_core::DisplayId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::HubError;

/// Name given to a display that registers without one.
pub const DEFAULT_DISPLAY_NAME: &str = "Display";

/// Playback commands relayed from a controller to its display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Load,
    Play,
    Pause,
    Seek,
    SetRate,
    SetLoop,
}

impl CommandKind {
    /// Map a wire `type` value to a command, if it is one.
    pub fn from_type(message_type: &str) -> Option<Self> {
        match message_type {
            "LOAD" => Some(Self::Load),
            "PLAY" => Some(Self::Play),
            "PAUSE" => Some(Self::Pause),
            "SEEK" => Some(Self::Seek),
            "SET_RATE" => Some(Self::SetRate),
            "SET_LOOP" => Some(Self::SetLoop),
            _ => None,
        }
    }

    /// The wire `type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "LOAD",
            Self::Play => "PLAY",
            Self::Pause => "PAUSE",
            Self::Seek => "SEEK",
            Self::SetRate => "SET_RATE",
            Self::SetLoop => "SET_LOOP",
        }
    }
}

/// A classified inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `{"type":"register","name":...}`
    Register { name: String },
    /// `{"type":"list_displays"}`
    ListDisplays,
    /// `{"type":"attach","displayId":...}`
    Attach { display_id: String },
    /// A playback command; `raw` is the frame exactly as received.
    Command { kind: CommandKind, raw: String },
    /// A well-formed frame with a `type` outside the protocol.
    Unknown { message_type: String },
}

impl ClientMessage {
    /// Classify a text frame.
    ///
    /// Anything that is not a JSON object with a string `type` field, or a
    /// known message whose fields have the wrong JSON type, is
    /// [`HubError::Malformed`].
    pub fn parse(text: &str) -> Result<Self, HubError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| HubError::Malformed(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| HubError::Malformed("expected a JSON object".into()))?;
        let message_type = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| HubError::Malformed("missing string `type` field".into()))?;

        let message = match message_type {
            "register" => ClientMessage::Register {
                name: optional_str(obj.get("name"), "name")?
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(DEFAULT_DISPLAY_NAME)
                    .to_owned(),
            },
            "list_displays" => ClientMessage::ListDisplays,
            "attach" => ClientMessage::Attach {
                display_id: optional_str(obj.get("displayId"), "displayId")?
                    .unwrap_or_default()
                    .to_owned(),
            },
            other => match CommandKind::from_type(other) {
                Some(kind) => ClientMessage::Command {
                    kind,
                    raw: text.to_owned(),
                },
                None => ClientMessage::Unknown {
                    message_type: other.to_owned(),
                },
            },
        };

        Ok(message)
    }
}

fn optional_str<'a>(value: Option<&'a Value>, field: &str) -> Result<Option<&'a str>, HubError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(HubError::Malformed(format!("`{field}` must be a string"))),
    }
}

/// One entry of a `displays` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySummary {
    pub id: DisplayId,
    pub name: String,
}

/// Frames sent by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Registered {
        id: DisplayId,
    },
    Displays {
        displays: Vec<DisplaySummary>,
    },
    Attached {
        #[serde(rename = "displayId")]
        display_id: DisplayId,
    },
    DisplayGone {
        #[serde(rename = "displayId")]
        display_id: DisplayId,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// Build an `error` frame from a hub error.
    pub fn error(err: &HubError) -> Self {
        ServerMessage::Error {
            message: err.to_string(),
        }
    }

    /// Serialize to the JSON text sent on the wire.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"serialization failed: {e}"}}"#)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_register() {
        let msg = ClientMessage::parse(r#"{"type":"register","name":"Living room"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Register {
                name: "Living room".into()
            }
        );
    }

    #[test]
    fn register_without_name_gets_default() {
        let msg = ClientMessage::parse(r#"{"type":"register"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Register {
                name: DEFAULT_DISPLAY_NAME.into()
            }
        );
    }

    #[test]
    fn parse_attach() {
        let msg = ClientMessage::parse(r#"{"type":"attach","displayId":"abc"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Attach {
                display_id: "abc".into()
            }
        );
    }

    #[test]
    fn command_keeps_raw_text() {
        let text = r#"{"type":"SEEK", "time": 12.5, "extra": [1,2]}"#;
        match ClientMessage::parse(text).unwrap() {
            ClientMessage::Command { kind, raw } => {
                assert_eq!(kind, CommandKind::Seek);
                assert_eq!(raw, text);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn all_commands_recognised() {
        for name in ["LOAD", "PLAY", "PAUSE", "SEEK", "SET_RATE", "SET_LOOP"] {
            let kind = CommandKind::from_type(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
        assert!(CommandKind::from_type("play").is_none());
    }

    #[test]
    fn unknown_type() {
        let msg = ClientMessage::parse(r#"{"type":"JUMP"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Unknown {
                message_type: "JUMP".into()
            }
        );
    }

    #[test]
    fn malformed_payloads() {
        for text in [
            "not json",
            "[1,2,3]",
            r#""register""#,
            r#"{"name":"x"}"#,
            r#"{"type":42}"#,
            r#"{"type":"register","name":7}"#,
            r#"{"type":"attach","displayId":{}}"#,
        ] {
            let err = ClientMessage::parse(text).unwrap_err();
            assert!(matches!(err, HubError::Malformed(_)), "{text}: {err:?}");
        }
    }

    #[test]
    fn server_message_wire_format() {
        let id: DisplayId = "8a6e0804-2bd0-4672-b79d-d97027f9071a".parse().unwrap();

        let v: Value = serde_json::from_str(&ServerMessage::Registered { id }.to_text()).unwrap();
        assert_eq!(v["type"], "registered");
        assert_eq!(v["id"], id.to_string());

        let v: Value =
            serde_json::from_str(&ServerMessage::DisplayGone { display_id: id }.to_text())
                .unwrap();
        assert_eq!(v["type"], "display_gone");
        assert_eq!(v["displayId"], id.to_string());

        let v: Value = serde_json::from_str(
            &ServerMessage::Displays {
                displays: vec![DisplaySummary {
                    id,
                    name: "TV".into(),
                }],
            }
            .to_text(),
        )
        .unwrap();
        assert_eq!(v["type"], "displays");
        assert_eq!(v["displays"][0]["name"], "TV");

        let v: Value =
            serde_json::from_str(&ServerMessage::error(&HubError::NotAttached).to_text()).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["message"], "not attached to a display");
    }
}
