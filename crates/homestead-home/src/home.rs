//! The home record.

use std::collections::HashSet;

use homestead_protocol::{BlockVector, HomeId, Location, PlayerId};
use serde::{Deserialize, Serialize};

/// A saved teleport location owned by one player.
///
/// `name == None` marks the owner's primary home. Invites and the public
/// alias are only changed through [`HomeIndex`](crate::HomeIndex), which
/// guards alias uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    id: HomeId,
    owner: PlayerId,
    owner_name: String,
    name: Option<String>,
    world: String,
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    yaw: f32,
    #[serde(default)]
    pitch: f32,
    #[serde(default)]
    invites: HashSet<PlayerId>,
    #[serde(default)]
    public_name: Option<String>,
    #[serde(default)]
    visits: u32,
}

impl Home {
    pub fn new(
        id: HomeId,
        owner: PlayerId,
        owner_name: impl Into<String>,
        name: Option<String>,
        location: &Location,
    ) -> Self {
        Self {
            id,
            owner,
            owner_name: owner_name.into(),
            name,
            world: location.world.clone(),
            x: location.x,
            y: location.y,
            z: location.z,
            yaw: location.yaw,
            pitch: location.pitch,
            invites: HashSet::new(),
            public_name: None,
            visits: 0,
        }
    }

    pub fn id(&self) -> HomeId {
        self.id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn is_owner(&self, player: PlayerId) -> bool {
        self.owner == player
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Exact name match, where `None` only matches the primary home.
    pub fn is_named(&self, name: Option<&str>) -> bool {
        self.name.as_deref() == name
    }

    pub fn is_primary(&self) -> bool {
        self.name.is_none()
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn is_in_world(&self, world: &str) -> bool {
        self.world == world
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn location(&self) -> Location {
        Location::new(self.world.clone(), self.x, self.y, self.z).facing(self.yaw, self.pitch)
    }

    pub(crate) fn set_location(&mut self, location: &Location) {
        self.world = location.world.clone();
        self.x = location.x;
        self.y = location.y;
        self.z = location.z;
        self.yaw = location.yaw;
        self.pitch = location.pitch;
    }

    pub fn block_vector(&self) -> BlockVector {
        self.location().to_block()
    }

    pub fn invites(&self) -> &HashSet<PlayerId> {
        &self.invites
    }

    pub fn is_invited(&self, player: PlayerId) -> bool {
        self.invites.contains(&player)
    }

    pub(crate) fn invites_mut(&mut self) -> &mut HashSet<PlayerId> {
        &mut self.invites
    }

    pub fn public_name(&self) -> Option<&str> {
        self.public_name.as_deref()
    }

    pub(crate) fn set_public_name(&mut self, alias: String) {
        self.public_name = Some(alias);
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub(crate) fn add_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    /// The `owner:name` form other players type to use this home. Primary
    /// homes end in a bare colon.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.owner_name, self.name.as_deref().unwrap_or(""))
    }
}
