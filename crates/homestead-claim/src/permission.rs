//! Permission checks: may this player do this thing in this claim?
//!
//! Every check reduces to one comparison, `trust >= action.required()`,
//! with a single escape hatch for staff who toggled "ignore claims".
//! Outside of any claim everything is allowed.

use homestead_protocol::{BlockVector, PlayerId};

use crate::{Claim, ClaimIndex, TrustType};

/// Something a player tries to do inside a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk in. Only a ban blocks this.
    Enter,
    /// Use doors, buttons, levers.
    Interact,
    /// Open chests and other containers.
    OpenContainer,
    /// Place or break blocks.
    Build,
}

impl Action {
    /// Minimum trust that permits the action.
    pub fn required(self) -> TrustType {
        match self {
            Self::Enter => TrustType::None,
            Self::Interact => TrustType::Interact,
            Self::OpenContainer => TrustType::Container,
            Self::Build => TrustType::Build,
        }
    }
}

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub player: PlayerId,
    /// Staff bypass. Skips every claim check.
    pub ignore_claims: bool,
}

impl Actor {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            ignore_claims: false,
        }
    }

    pub fn ignoring_claims(player: PlayerId) -> Self {
        Self {
            player,
            ignore_claims: true,
        }
    }
}

/// The trust `player` holds in `claim`.
pub fn trust_type(claim: &Claim, player: PlayerId) -> TrustType {
    claim.trust_type(player)
}

pub fn evaluate(claim: &Claim, actor: Actor, action: Action) -> bool {
    actor.ignore_claims || claim.trust_type(actor.player) >= action.required()
}

/// `true` if `player` may place and break blocks in `claim`.
pub fn can_build(claim: &Claim, player: PlayerId, ignore_claims: bool) -> bool {
    evaluate(
        claim,
        Actor {
            player,
            ignore_claims,
        },
        Action::Build,
    )
}

/// Build check for a block position. Unclaimed land is open to everyone.
pub fn can_build_at(index: &ClaimIndex, actor: Actor, block: &BlockVector) -> bool {
    match index.claim_at_block(block) {
        Some(claim) => evaluate(claim, actor, Action::Build),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Area;
    use homestead_protocol::ClaimId;

    fn pid(n: u128) -> PlayerId {
        PlayerId::from_u128(n)
    }

    fn claim() -> Claim {
        Claim::new(ClaimId(1), "world", Area::new(0, 0, 9, 9), pid(1), "Owner")
    }

    #[test]
    fn test_evaluate_owner_allowed_everything() {
        let c = claim();
        for action in [Action::Enter, Action::Interact, Action::OpenContainer, Action::Build] {
            assert!(evaluate(&c, Actor::new(pid(1)), action));
        }
    }

    #[test]
    fn test_evaluate_stranger_may_only_enter() {
        let c = claim();
        let stranger = Actor::new(pid(2));
        assert!(evaluate(&c, stranger, Action::Enter));
        assert!(!evaluate(&c, stranger, Action::Interact));
        assert!(!evaluate(&c, stranger, Action::Build));
    }

    #[test]
    fn test_evaluate_banned_cannot_enter() {
        let mut c = claim();
        c.set_trust(pid(2), TrustType::Ban);
        assert!(!evaluate(&c, Actor::new(pid(2)), Action::Enter));
    }

    #[test]
    fn test_evaluate_container_trust_includes_interact() {
        let mut c = claim();
        c.set_trust(pid(2), TrustType::Container);
        let actor = Actor::new(pid(2));
        assert!(evaluate(&c, actor, Action::Interact));
        assert!(evaluate(&c, actor, Action::OpenContainer));
        assert!(!evaluate(&c, actor, Action::Build));
    }

    #[test]
    fn test_can_build_ignore_claims_bypasses_ban() {
        let mut c = claim();
        c.set_trust(pid(2), TrustType::Ban);
        assert!(!can_build(&c, pid(2), false));
        assert!(can_build(&c, pid(2), true));
    }

    #[test]
    fn test_can_build_at_unclaimed_allowed() {
        let index = ClaimIndex::new();
        let block = BlockVector::new("world", 100, 64, 100);
        assert!(can_build_at(&index, Actor::new(pid(2)), &block));
    }
}
