//! Axis-aligned rectangles on the horizontal plane.
//!
//! Claims reach from bedrock to build height, so an [`Area`] only has x and
//! z. Both corners are inclusive: an area from (0, 0) to (9, 9) covers 100
//! blocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl Area {
    /// Builds an area from two arbitrary opposite corners; min/max are
    /// sorted out here so callers can pass selection points in any order.
    pub fn new(x1: i32, z1: i32, x2: i32, z2: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_z: z1.min(z2),
            max_x: x1.max(x2),
            max_z: z1.max(z2),
        }
    }

    /// A square of side `2 * radius + 1` centred on a block.
    pub fn around(x: i32, z: i32, radius: i32) -> Self {
        Self::new(x - radius, z - radius, x + radius, z + radius)
    }

    pub fn width(&self) -> u64 {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64
    }

    pub fn height(&self) -> u64 {
        (i64::from(self.max_z) - i64::from(self.min_z) + 1) as u64
    }

    /// Number of blocks covered, compared against a claim's block quota.
    /// Saturates at `u64::MAX` for areas spanning the whole i32 plane.
    pub fn size(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    pub fn center_x(&self) -> i32 {
        ((i64::from(self.min_x) + i64::from(self.max_x)).div_euclid(2)) as i32
    }

    pub fn center_z(&self) -> i32 {
        ((i64::from(self.min_z) + i64::from(self.max_z)).div_euclid(2)) as i32
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// `true` if the point is inside the area or at most `radius` blocks
    /// outside any edge.
    pub fn is_within(&self, x: i32, z: i32, radius: i32) -> bool {
        self.outset(radius).contains(x, z)
    }

    pub fn overlaps(&self, other: &Area) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }

    /// Grows every edge outward by `n` blocks. Negative `n` shrinks.
    pub fn outset(&self, n: i32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(n),
            min_z: self.min_z.saturating_sub(n),
            max_x: self.max_x.saturating_add(n),
            max_z: self.max_z.saturating_add(n),
        }
    }

    /// The smallest area that covers both `self` and the given block.
    pub fn including(&self, x: i32, z: i32) -> Self {
        Self {
            min_x: self.min_x.min(x),
            min_z: self.min_z.min(z),
            max_x: self.max_x.max(x),
            max_z: self.max_z.max(z),
        }
    }
}
