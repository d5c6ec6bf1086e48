//! Identity and position types shared by every layer.
//!
//! The core never holds a live handle to a player or a world. It works on
//! plain values (an id, a world name, some coordinates) and the host
//! translates those to and from whatever the game server uses.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's stable identity: the account UUID.
///
/// Newtype so a `PlayerId` can never be confused with some other UUID
/// (a bossbar, an entity). `#[serde(transparent)]` keeps the wire form a
/// bare UUID string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// The all-zero id. Handy as a placeholder in tests and docs.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// A fresh random (v4) id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an id from a raw 128-bit value. Mostly for tests.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row id of a claim, assigned when the claim is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClaimId(pub u32);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Row id of a home.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HomeId(pub u32);

impl fmt::Display for HomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// An integer block position inside a named world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockVector {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

impl fmt::Display for BlockVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {},{},{}", self.world, self.x, self.y, self.z)
    }
}

/// A precise position plus facing, as a player stands in the world.
///
/// Block coordinates are derived by flooring, so `-0.5` lands in block
/// `-1`, not `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    /// A location with neutral facing.
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Returns a copy facing the given direction.
    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn block_x(&self) -> i32 {
        self.x.floor() as i32
    }

    pub fn block_y(&self) -> i32 {
        self.y.floor() as i32
    }

    pub fn block_z(&self) -> i32 {
        self.z.floor() as i32
    }

    /// The block this location is inside.
    pub fn to_block(&self) -> BlockVector {
        BlockVector::new(
            self.world.clone(),
            self.block_x(),
            self.block_y(),
            self.block_z(),
        )
    }
}

// ---------------------------------------------------------------------------
// Player snapshot
// ---------------------------------------------------------------------------

/// The player's game mode. Only `Spectator` changes core behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// What the core needs to know about a connected player, captured by the
/// host once per tick or per command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub location: Location,
    #[serde(default)]
    pub game_mode: GameMode,
    /// `true` while the player is gliding with an elytra.
    #[serde(default)]
    pub gliding: bool,
}

impl PlayerView {
    /// A survival-mode player standing at `location`.
    pub fn new(id: PlayerId, name: impl Into<String>, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            game_mode: GameMode::Survival,
            gliding: false,
        }
    }

    pub fn is_spectator(&self) -> bool {
        matches!(self.game_mode, GameMode::Spectator)
    }
}
