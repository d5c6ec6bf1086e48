//! Error types for the claim layer.

use homestead_protocol::ClaimId;

/// Errors raised when mutating the claim index.
///
/// An overlap is an invariant violation: upstream code is expected to have
/// checked already, so reaching it means a bug or a race, and the index
/// refuses loudly instead of silently storing two owners for one block.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("claim {claim} would overlap existing claim {existing}")]
    Overlap { claim: ClaimId, existing: ClaimId },

    #[error("claim {0} already exists")]
    DuplicateId(ClaimId),

    #[error("claim {0} not found")]
    NotFound(ClaimId),

    #[error("claim {0} has no world")]
    MissingWorld(ClaimId),
}
