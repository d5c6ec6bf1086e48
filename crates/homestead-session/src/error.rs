//! Error types for the session layer.

use homestead_protocol::PlayerId;

/// Errors from [`SessionManager`](crate::SessionManager).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// No session exists for the given player. Either they never joined
    /// or they already left.
    #[error("session not found for player {0}")]
    NotFound(PlayerId),

    /// The player already has a session. A join event fired twice
    /// without a quit in between.
    #[error("player {0} already has an active session")]
    AlreadyConnected(PlayerId),
}
