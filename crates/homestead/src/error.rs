//! Unified error type for Homestead.

use homestead_claim::ClaimError;
use homestead_home::HomeError;
use homestead_protocol::ProtocolError;
use homestead_session::SessionError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// These are internal faults: bad data loaded from storage, a duplicate
/// join event, an unreadable config file. Player mistakes are never
/// reported this way; commands answer those with a
/// [`Warning`](homestead_protocol::Warning).
#[derive(Debug, thiserror::Error)]
pub enum HomesteadError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Home(#[from] HomeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
