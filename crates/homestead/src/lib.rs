//! # Homestead
//!
//! Player homes and land claims for a network of Minecraft servers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  homestead (this crate)                                  │
//! │  config, shared state, /homes commands, /home travel,    │
//! │  claim growing, tick driver                              │
//! ├──────────────────────────────────────────────────────────┤
//! │  homestead-session  per-player claim tracking, throttled │
//! │                     notices, confirmations, pages        │
//! ├─────────────────────────────┬────────────────────────────┤
//! │  homestead-claim            │  homestead-home            │
//! │  areas, trust, spatial      │  homes, invites, public    │
//! │  index, permissions         │  aliases, home worlds      │
//! ├─────────────────────────────┴────────────────────────────┤
//! │  homestead-protocol  ids, locations, events, warnings,   │
//! │                      remote command codec                │
//! ├──────────────────────────────────────────────────────────┤
//! │  homestead-tick      fixed-rate scheduler                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The game server plugs in through [`Platform`] (messages, teleports,
//! player lookups) and [`HomeStore`](homestead_home::HomeStore)
//! (persistence).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use homestead::prelude::*;
//!
//! homestead::init_tracing();
//! let config = HomesteadConfig::load("homestead.toml")?;
//! let tick = config.tick.clone();
//! let shared = Homestead::new(config, MyPlatform::new(), MyStore::new()).into_shared();
//! let driver = TickDriver::spawn(shared.clone(), tick);
//!
//! // on "/home base" from a player:
//! homestead::travel::home(&shared, &player, Some("base")).await?;
//!
//! driver.shutdown().await;
//! ```

mod claims;
mod commands;
mod config;
mod driver;
mod error;
mod platform;
mod state;
mod telemetry;
pub mod travel;

pub use claims::{GROW_REACH, GrowOutcome};
pub use config::{ConfigError, HomesteadConfig};
pub use driver::{TickDriver, run as run_tick_loop};
pub use error::HomesteadError;
pub use platform::Platform;
pub use state::{Homestead, SharedHomestead};
pub use telemetry::init_tracing;
pub use travel::{Arrival, Destination, TravelOutcome};

// Re-export sub-crates for direct access.
pub use homestead_claim as claim;
pub use homestead_home as home;
pub use homestead_protocol as protocol;
pub use homestead_session as session;
pub use homestead_tick as tick;

/// Convenience re-exports for the types a server plugin touches most.
pub mod prelude {
    pub use crate::{
        Destination, GrowOutcome, Homestead, HomesteadConfig, HomesteadError, Platform,
        SharedHomestead, TickDriver, TravelOutcome,
    };
    pub use homestead_claim::{Area, Claim, ClaimSetting, TrustType};
    pub use homestead_home::{Home, HomeInvite, HomeStore, HomeWorld};
    pub use homestead_protocol::{
        BlockVector, ClaimId, HomeId, Location, PlayerId, PlayerView, PluginEvent, Warning,
    };
    pub use homestead_session::{InteractEvent, InteractKind, InteractResponse, SessionHost};
}
