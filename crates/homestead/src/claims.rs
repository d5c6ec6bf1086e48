//! Growing claims by hand and buying claim blocks.
//!
//! `/claim grow` stretches the nearest own claim so it covers the block
//! column the player stands in. When the claim's block quota cannot pay
//! for the new area, the request is parked on the session as a
//! [`ClaimGrowSnippet`]. Buying blocks from the same spot finishes it.

use homestead_claim::ClaimError;
use homestead_home::HomeStore;
use homestead_protocol::{ClaimId, PlayerId, PlayerView, Warning};
use homestead_session::ClaimGrowSnippet;

use crate::{Homestead, Platform};

/// How far outside its border a claim is still found by `/claim grow`.
pub const GROW_REACH: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowOutcome {
    Grown { claim: ClaimId, size: u64 },
    /// Parked until the claim has `missing` more blocks.
    MissingBlocks { claim: ClaimId, missing: u64 },
}

impl<P: Platform, S: HomeStore> Homestead<P, S> {
    pub fn grow_claim(&mut self, player: &PlayerView) -> Result<GrowOutcome, Warning> {
        let location = &player.location;
        let (x, z) = (location.block_x(), location.block_z());
        if let Some(claim) = self.claims.claim_at(&location.world, x, z) {
            return Err(Warning::new(if claim.is_owner(player.id) {
                "Stand outside your claim, where it should grow to"
            } else {
                "This spot belongs to another claim"
            }));
        }

        let id = self
            .claims
            .claims_owned_by(player.id)
            .into_iter()
            .find(|claim| {
                claim.is_in_world(&location.world) && claim.area().is_within(x, z, GROW_REACH)
            })
            .map(|claim| claim.id())
            .ok_or_else(|| Warning::new("There is no claim of yours nearby"))?;

        self.grow_to(player.id, id, &location.world, x, z)
    }

    /// Adds purchased blocks to a claim. If the player has a parked grow
    /// for this claim and has not moved, it is retried right away.
    pub fn add_claim_blocks(
        &mut self,
        player: &PlayerView,
        claim_id: ClaimId,
        amount: u64,
    ) -> Result<Option<GrowOutcome>, Warning> {
        let ignore = self.ignores_claims(player.id);
        let claim = self
            .claims
            .get_mut(claim_id)
            .filter(|claim| ignore || claim.is_owner(player.id))
            .ok_or_else(|| Warning::new("You do not own this claim"))?;
        claim.add_blocks(amount);
        let total = claim.blocks();
        self.tell(
            player.id,
            &format!("Added {amount} claim blocks ({total} total)"),
        );

        let parked = self
            .sessions
            .get(&player.id)
            .and_then(|session| session.claim_grow_snippet())
            .filter(|snippet| snippet.claim_id == claim_id && snippet.is_near(&player.location))
            .cloned();
        match parked {
            Some(snippet) => self
                .grow_to(player.id, claim_id, &snippet.world, snippet.x, snippet.z)
                .map(Some),
            None => Ok(None),
        }
    }

    fn grow_to(
        &mut self,
        player: PlayerId,
        id: ClaimId,
        world: &str,
        x: i32,
        z: i32,
    ) -> Result<GrowOutcome, Warning> {
        let (area, blocks) = {
            let claim = self
                .claims
                .get(id)
                .ok_or_else(|| Warning::new("Claim not found"))?;
            (claim.area().including(x, z), claim.blocks())
        };

        let size = area.size();
        if size > blocks {
            let missing = size - blocks;
            if let Some(session) = self.sessions.get_mut(&player) {
                session.set_claim_grow_snippet(Some(ClaimGrowSnippet {
                    world: world.to_string(),
                    x,
                    z,
                    claim_id: id,
                }));
            }
            self.tell(
                player,
                &format!("You need {missing} more claim blocks to grow this claim"),
            );
            return Ok(GrowOutcome::MissingBlocks { claim: id, missing });
        }

        self.claims.resize(id, area).map_err(|e| match e {
            ClaimError::Overlap { .. } => Warning::new("Your claim would overlap another claim"),
            _ => Warning::new("Claim not found"),
        })?;
        if let Some(session) = self.sessions.get_mut(&player) {
            session.set_claim_grow_snippet(None);
        }

        if let Some(claim) = self.claims.get(id) {
            self.platform.highlight_claim(player, claim);
        }
        self.tell(
            player,
            &format!("Claim grown to {}x{}", area.width(), area.height()),
        );
        Ok(GrowOutcome::Grown { claim: id, size })
    }
}
