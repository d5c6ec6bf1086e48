//! Raw interaction events routed to a session-installed handler.
//!
//! Some claim tools ("click two corners to select an area") need the next
//! few clicks of one player. They install an [`InteractCallback`] on that
//! player's session; the server forwards every interaction there until
//! the handler answers [`InteractResponse::Finished`] or fails.

use std::error::Error;

use homestead_claim::ClaimIndex;
use homestead_protocol::{BlockVector, PlayerId};

/// What the player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractKind {
    LeftClickBlock,
    RightClickBlock,
    LeftClickAir,
    RightClickAir,
    /// Stepping on a pressure plate, trampling farmland.
    Physical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractEvent {
    pub player: PlayerId,
    pub kind: InteractKind,
    /// The clicked block, absent for clicks into the air.
    pub block: Option<BlockVector>,
}

/// A handler's verdict on one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractResponse {
    /// Not for us; the game handles the event as usual.
    Ignored,
    /// Consumed. Keep the handler installed.
    Handled,
    /// Consumed, and the handler is done. Uninstall it.
    Finished,
}

impl InteractResponse {
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Boxed error a handler may fail with. Failures are logged, never
/// propagated.
pub type InteractError = Box<dyn Error + Send + Sync>;

pub type InteractCallback = Box<
    dyn FnMut(&mut ClaimIndex, &InteractEvent) -> Result<InteractResponse, InteractError> + Send,
>;
