//! Everything Homestead needs from the game server beyond ticking.
//!
//! [`SessionHost`] covers the per-tick side effects. [`Platform`] adds
//! player lookups and the asynchronous operations used by commands:
//! bringing a player somewhere (possibly after a chunk load) and handing
//! a command to another server.

use std::future::Future;

use homestead_protocol::{Location, PlayerId, PlayerView};
use homestead_session::SessionHost;

/// The game-server side of Homestead.
///
/// # Async results
///
/// [`bring`](Self::bring) and [`surface_location`](Self::surface_location)
/// resolve to `None` when the player disconnected (or the world went
/// away) in the meantime. Callers treat that as "abort silently".
pub trait Platform: SessionHost {
    /// Snapshot of every connected player, taken once per tick.
    fn online_players(&self) -> Vec<PlayerView>;

    /// Name-to-id lookup over every player who ever joined.
    fn player_id_for_name(&self, name: &str) -> Option<PlayerId>;

    fn name_for_player(&self, player: PlayerId) -> Option<String>;

    fn is_online(&self, player: PlayerId) -> bool;

    /// Teleports the player. Resolves to the player once they arrived.
    fn bring(
        &self,
        player: PlayerId,
        location: Location,
    ) -> impl Future<Output = Option<PlayerId>> + Send;

    /// Loads the chunk around `(x, z)` and returns the standing spot on
    /// top of the highest block, centred in it.
    fn surface_location(
        &self,
        world: &str,
        x: i32,
        z: i32,
    ) -> impl Future<Output = Option<Location>> + Send;

    /// One-way hand-off of an encoded command to another server.
    fn dispatch_remote(&self, player: PlayerId, server: &str, payload: Vec<u8>);

    /// Sends the player to a random spot where they may build. The search
    /// itself belongs to the platform.
    fn find_place_to_build(&self, player: PlayerId);
}
