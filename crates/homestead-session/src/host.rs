//! The side effects a session needs from the game server.
//!
//! Homestead never talks to the game directly. A session decides *what*
//! should happen on a tick ("kick this player out of the claim", "show
//! this action bar") and asks a [`SessionHost`] to do it. The real server
//! plugin implements the trait against the game API; tests implement it
//! with a recorder and assert on the calls.

use homestead_claim::Claim;
use homestead_protocol::{Location, PlayerId, PlayerView, PluginEvent};

/// Game-server callbacks used while ticking a session.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because the host is shared with the tick
/// driver task and the command handlers.
///
/// All methods are synchronous and fire-and-forget. The only one with a
/// result is [`kick`](Self::kick), which must return where the player
/// ended up so the session can re-check claim membership there.
pub trait SessionHost: Send + Sync + 'static {
    /// Moves the player out of `claim` and returns their new location.
    fn kick(&self, player: &PlayerView, claim: &Claim) -> Location;

    /// Shows a short-lived line above the hotbar.
    fn send_action_bar(&self, player: PlayerId, text: &str);

    fn send_message(&self, player: PlayerId, text: &str);

    /// Outlines the claim's border for this player.
    fn highlight_claim(&self, player: PlayerId, claim: &Claim);

    fn stop_gliding(&self, player: PlayerId);

    /// Publishes a plugin event. Nothing in Homestead waits on listeners.
    fn emit(&self, event: PluginEvent);
}
