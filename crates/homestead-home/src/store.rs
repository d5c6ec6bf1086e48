//! Persistence seam.
//!
//! Homestead keeps every home in memory and writes changes through a
//! [`HomeStore`]. Writes are fire-and-forget: an implementation backed by
//! a database spawns the query and returns at once, and the in-memory
//! index stays the source of truth for the running server.

use homestead_protocol::{HomeId, PlayerId};

use crate::Home;

/// One row of the invite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HomeInvite {
    pub home: HomeId,
    pub invitee: PlayerId,
}

/// Where home changes are written.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because the store lives inside the shared
/// state, which tick and command tasks reach from any runtime thread.
///
/// # Example
///
/// ```rust
/// use homestead_home::{Home, HomeInvite, HomeStore};
/// use homestead_protocol::HomeId;
///
/// /// Keeps nothing. Fine for a creative test server.
/// struct Forgetful;
///
/// impl HomeStore for Forgetful {
///     fn insert_home(&self, _home: &Home) {}
///     fn update_home(&self, _home: &Home) {}
///     fn save_public_name(&self, _home: &Home) {}
///     fn save_visits(&self, _home: &Home) {}
///     fn delete_home(&self, _home: HomeId) {}
///     fn save_invite(&self, _invite: HomeInvite) {}
///     fn delete_invite(&self, _invite: HomeInvite) {}
/// }
/// ```
pub trait HomeStore: Send + Sync + 'static {
    fn insert_home(&self, home: &Home);

    /// The location changed.
    fn update_home(&self, home: &Home);

    /// Only the public alias column changed.
    fn save_public_name(&self, home: &Home);

    /// Only the visit counter changed.
    fn save_visits(&self, home: &Home);

    /// Deletes the home together with all of its invites.
    fn delete_home(&self, home: HomeId);

    fn save_invite(&self, invite: HomeInvite);

    fn delete_invite(&self, invite: HomeInvite);
}
