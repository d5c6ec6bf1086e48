//! Player sessions for Homestead.
//!
//! This crate holds the runtime state of every connected player:
//!
//! 1. **Claim tracking**: which claim the player is standing in, with
//!    enter/leave notices, ban kicks, auto-grow and the no-elytra rule
//!    ([`Session::tick`])
//! 2. **Throttled notices**: one shared cooldown per player
//! 3. **Pending interactions**: a confirmation slot and a raw
//!    interaction handler slot, each holding at most one entry
//! 4. **Registry**: one session per player ([`SessionManager`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (above)  ← owns the SessionManager, feeds it PlayerViews each tick
//!     ↕
//! Session Layer (this crate)  ← per-player state machine
//!     ↕
//! Claim + Home Layers (below)  ← ClaimIndex lookups, HomeWorlds registry
//! ```
//!
//! Side effects leave through the [`SessionHost`] trait, so the state
//! machine is testable without a game server.

mod error;
mod host;
mod interact;
mod manager;
mod session;

pub use error::SessionError;
pub use host::SessionHost;
pub use interact::{InteractCallback, InteractError, InteractEvent, InteractKind, InteractResponse};
pub use manager::SessionManager;
pub use session::{
    ClaimGrowSnippet, Session, SessionConfig, SidebarPanel, SidebarPriority, TickContext,
};
