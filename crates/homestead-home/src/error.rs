//! Error types for the home layer.

use homestead_protocol::{HomeId, PlayerId};

/// Errors raised by [`HomeIndex`](crate::HomeIndex) mutations.
///
/// None of these leave the index half-changed: every check runs before
/// the first write.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HomeError {
    #[error("home {0} not found")]
    NotFound(HomeId),

    #[error("home {0} already exists")]
    DuplicateId(HomeId),

    #[error("player {player} is not invited to home {home}")]
    NotInvited { home: HomeId, player: PlayerId },

    /// The home already carries a public alias.
    #[error("home is already public under the alias \"{0}\"")]
    AlreadyPublic(String),

    /// A primary home has no name to fall back on as its alias.
    #[error("no public name supplied")]
    MissingPublicName,

    #[error("public name \"{0}\" is taken")]
    PublicNameTaken(String),
}
