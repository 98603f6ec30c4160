//! Opaque identifiers for hub participants.
//!
//! Both ids wrap a random v4 `Uuid`. Keeping them as distinct types means a
//! connection's `SessionId` can never be passed where a `DisplayId` is
//! expected, and neither ever reveals anything about the socket behind it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declare a uuid-backed id type that serializes as its hyphenated string.
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                /// Mint a fresh random id.
                #[must_use]
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    Uuid::parse_str(s).map(Self)
                }
            }
        )+
    };
}

typed_id! {
    /// Identifier minted for a receiver when it registers as a display.
    DisplayId,
    /// Opaque per-connection identifier for a control session.
    SessionId,
}
