//! Error types shared by every Homestead crate.
//!
//! Two very different things can go wrong in a command:
//!
//! - the *player* asked for something we won't do (unknown home, no
//!   permission, duplicate alias). That is a [`Warning`]: a short message
//!   shown to whoever ran the command. Nothing was mutated.
//! - the *server* failed at something it should have been able to do
//!   (a payload would not encode). That is a [`ProtocolError`], logged and
//!   never shown verbatim to a player.

use std::fmt;

/// Errors that can occur while encoding or decoding payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed input or a shape mismatch.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload decoded but carries values we refuse to act on,
    /// e.g. an empty target server.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// A user-facing refusal.
///
/// Commands return `Result<T, Warning>`; the command layer shows the
/// message to the invoking player and aborts. Because it is an ordinary
/// value (not a panic or an unwinding exception) it travels through `?`
/// like any other error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning(String);

impl Warning {
    /// Creates a warning with the given player-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The message to show the player.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Warning {}

impl From<&str> for Warning {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Warning {
    fn from(message: String) -> Self {
        Self(message)
    }
}
