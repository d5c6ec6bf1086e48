//! # homestead-home
//!
//! Player homes: saved teleport spots, optionally named, optionally shared
//! with invited players or published under a network-wide alias.
//!
//! ## Naming
//!
//! | Typed by the player | Resolves to |
//! |---|---|
//! | `/home` | the caller's primary home (`name == None`) |
//! | `/home farm` | the caller's home called `farm` |
//! | `/home Steve:farm` | Steve's `farm`, if the caller is invited |
//! | `/home Steve:` | Steve's primary home, if the caller is invited |
//! | `/visit spawnhut` | whichever home is public as `spawnhut` |
//!
//! This crate only stores and looks up homes; deciding whether a caller
//! may actually travel there is the facade's job.

mod error;
mod home;
mod index;
mod store;
mod world;

pub use error::HomeError;
pub use home::Home;
pub use index::HomeIndex;
pub use store::{HomeInvite, HomeStore};
pub use world::{HomeWorld, HomeWorlds};
