//! Shared vocabulary for Homestead.
//!
//! Every other crate speaks in these types:
//!
//! - **Identity** ([`PlayerId`], [`ClaimId`], [`HomeId`]) and **position**
//!   ([`BlockVector`], [`Location`], [`PlayerView`]).
//! - **Events** ([`PluginEvent`]) emitted for other plugins to observe.
//! - **Cross-server dispatch** ([`RemoteCommand`], [`Codec`], [`JsonCodec`]).
//! - **Errors** ([`Warning`] for player-facing refusals, [`ProtocolError`]
//!   for encoding faults).
//!
//! ```text
//! homestead (commands, travel, tick driver)
//!     ↕
//! session ── claim ── home
//!     ↕
//! protocol (this crate)
//! ```

mod codec;
mod error;
mod event;
mod remote;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{ProtocolError, Warning};
pub use event::PluginEvent;
pub use remote::RemoteCommand;
pub use types::{
    BlockVector, ClaimId, GameMode, HomeId, Location, PlayerId, PlayerView,
};
