//! The envelope for handing a command to another game server.
//!
//! Homes live in worlds, and worlds live on servers. When a player asks
//! for a home whose world is hosted elsewhere, the core does not teleport;
//! it re-issues the same command on the owning server and lets that
//! server resolve it again. Delivery is one-way: no acknowledgement comes
//! back.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCommand {
    /// The player the command runs as.
    pub player: PlayerId,
    /// Command line without the leading slash, e.g. `home base`.
    pub command: String,
    /// Target server id as known to the proxy.
    pub server: String,
}

impl RemoteCommand {
    pub fn new(
        player: PlayerId,
        command: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            player,
            command: command.into(),
            server: server.into(),
        }
    }

    /// Rejects envelopes a proxy could not route.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidMessage`] if the command or server is blank.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.command.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage("empty remote command".into()));
        }
        if self.server.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage("empty target server".into()));
        }
        Ok(())
    }
}
