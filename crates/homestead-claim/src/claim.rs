//! The claim record: an owned area plus who may do what inside it.

use std::collections::HashMap;

use homestead_protocol::{BlockVector, ClaimId, Location, PlayerId};
use serde::{Deserialize, Serialize};

use crate::{Area, ClaimSetting, TrustType};

/// Display name used for claims without an owner.
pub const ADMIN_OWNER_NAME: &str = "the administrators";

/// A rectangular piece of one world, owned by a player (or by the server
/// when `owner` is `None`).
///
/// The area is read-only from the outside. It only changes through
/// [`ClaimIndex::resize`](crate::ClaimIndex::resize) or auto-grow, because
/// the index has to re-bucket the claim and re-check for overlaps whenever
/// it moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    id: ClaimId,
    world: String,
    area: Area,
    owner: Option<PlayerId>,
    owner_name: String,
    name: Option<String>,
    trust: HashMap<PlayerId, TrustType>,
    settings: HashMap<ClaimSetting, bool>,
    /// Purchased quota. May exceed `area.size()`, which is what lets the
    /// claim grow.
    blocks: u64,
}

impl Claim {
    /// A player-owned claim whose quota equals its initial size.
    pub fn new(
        id: ClaimId,
        world: impl Into<String>,
        area: Area,
        owner: PlayerId,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            world: world.into(),
            area,
            owner: Some(owner),
            owner_name: owner_name.into(),
            name: None,
            trust: HashMap::new(),
            settings: HashMap::new(),
            blocks: area.size(),
        }
    }

    /// A server-owned claim (spawn, event areas).
    pub fn admin(id: ClaimId, world: impl Into<String>, area: Area) -> Self {
        Self {
            id,
            world: world.into(),
            area,
            owner: None,
            owner_name: ADMIN_OWNER_NAME.to_string(),
            name: None,
            trust: HashMap::new(),
            settings: HashMap::new(),
            blocks: area.size(),
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub(crate) fn set_area(&mut self, area: Area) {
        self.area = area;
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// `"Steve's"`, or `"Chris'"` for names ending in s.
    pub fn owner_genitive(&self) -> String {
        if self.owner_name.ends_with('s') || self.owner_name.ends_with('S') {
            format!("{}'", self.owner_name)
        } else {
            format!("{}'s", self.owner_name)
        }
    }

    pub fn is_owner(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    pub fn is_admin_claim(&self) -> bool {
        self.owner.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn is_in_world(&self, world: &str) -> bool {
        self.world == world
    }

    pub fn contains(&self, world: &str, x: i32, z: i32) -> bool {
        self.is_in_world(world) && self.area.contains(x, z)
    }

    pub fn contains_location(&self, location: &Location) -> bool {
        self.contains(&location.world, location.block_x(), location.block_z())
    }

    pub fn contains_block(&self, block: &BlockVector) -> bool {
        self.contains(&block.world, block.x, block.z)
    }

    // -- Trust --

    /// Resolves a player's effective trust.
    ///
    /// The owner always gets [`TrustType::MAX`], whatever the trust map
    /// says. Anyone else gets their explicit entry, or [`TrustType::None`]
    /// without one. Banning therefore requires an explicit
    /// [`TrustType::Ban`] entry.
    pub fn trust_type(&self, player: PlayerId) -> TrustType {
        if self.is_owner(player) {
            return TrustType::MAX;
        }
        self.trust.get(&player).copied().unwrap_or(TrustType::None)
    }

    /// The stored entry, if any, ignoring ownership.
    pub fn explicit_trust(&self, player: PlayerId) -> Option<TrustType> {
        self.trust.get(&player).copied()
    }

    /// Stores an explicit grant and returns the previous one.
    ///
    /// `Owner` cannot be granted; it is clamped to `CoOwner`. Setting
    /// `None` removes the entry.
    pub fn set_trust(&mut self, player: PlayerId, trust: TrustType) -> Option<TrustType> {
        match trust {
            TrustType::None => self.trust.remove(&player),
            TrustType::Owner => self.trust.insert(player, TrustType::CoOwner),
            other => self.trust.insert(player, other),
        }
    }

    pub fn remove_trust(&mut self, player: PlayerId) -> Option<TrustType> {
        self.trust.remove(&player)
    }

    /// Explicit entries, sorted by player id for stable output.
    pub fn trusted(&self) -> Vec<(PlayerId, TrustType)> {
        let mut list: Vec<_> = self.trust.iter().map(|(p, t)| (*p, *t)).collect();
        list.sort();
        list
    }

    // -- Settings --

    pub fn setting(&self, setting: ClaimSetting) -> bool {
        self.settings
            .get(&setting)
            .copied()
            .unwrap_or_else(|| setting.default_value())
    }

    pub fn set_setting(&mut self, setting: ClaimSetting, value: bool) {
        if value == setting.default_value() {
            self.settings.remove(&setting);
        } else {
            self.settings.insert(setting, value);
        }
    }

    // -- Block quota --

    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    pub fn set_blocks(&mut self, blocks: u64) {
        self.blocks = blocks;
    }

    pub fn add_blocks(&mut self, amount: u64) {
        self.blocks = self.blocks.saturating_add(amount);
    }

    /// Quota that is paid for but not yet covered by the area.
    pub fn spare_blocks(&self) -> u64 {
        self.blocks.saturating_sub(self.area.size())
    }
}
