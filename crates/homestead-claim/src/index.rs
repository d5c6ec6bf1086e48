//! Spatial lookup from (world, x, z) to the claim that owns the block.
//!
//! Every connected player asks "which claim am I in?" every tick, so a
//! linear scan over all claims is not an option. Each world keeps a grid
//! of 128×128 buckets; a claim is listed in every bucket its area touches.
//! A point query looks at one bucket, and buckets rarely hold more than a
//! handful of claims.
//!
//! Claims spanning more than [`OVERSIZE_CELLS`] buckets along either axis
//! (spawn, world-border admin claims) are kept in a short per-world list
//! instead, which every query also checks.
//!
//! # Concurrency note
//!
//! `ClaimIndex` is a plain single-owner structure. The whole Homestead
//! state sits behind one lock at a higher level, which serializes every
//! mutation (insert, resize, auto-grow, removal) against the tick loop.

use std::collections::{BTreeSet, HashMap};

use homestead_protocol::{BlockVector, ClaimId, Location, PlayerId};

use crate::{Area, Claim, ClaimError};

/// log2 of the bucket edge length.
const CELL_SHIFT: u32 = 7;

/// Widest span, in buckets per axis, that is still stored in the grid.
const OVERSIZE_CELLS: i64 = 64;

type Cell = (i32, i32);

fn cell_of(x: i32, z: i32) -> Cell {
    // Arithmetic shift floors negatives: -1 >> 7 == -1.
    (x >> CELL_SHIFT, z >> CELL_SHIFT)
}

/// Corner cells of an area, inclusive.
fn cell_bounds(area: &Area) -> (Cell, Cell) {
    (
        cell_of(area.min_x, area.min_z),
        cell_of(area.max_x, area.max_z),
    )
}

/// Number of buckets an area touches along x and along z.
fn cell_span(area: &Area) -> (i64, i64) {
    let ((x0, z0), (x1, z1)) = cell_bounds(area);
    (
        i64::from(x1) - i64::from(x0) + 1,
        i64::from(z1) - i64::from(z0) + 1,
    )
}

fn is_oversize(area: &Area) -> bool {
    let (w, h) = cell_span(area);
    w > OVERSIZE_CELLS || h > OVERSIZE_CELLS
}

fn cells_covering(area: &Area) -> impl Iterator<Item = Cell> {
    let ((x0, z0), (x1, z1)) = cell_bounds(area);
    (x0..=x1).flat_map(move |cx| (z0..=z1).map(move |cz| (cx, cz)))
}

/// Bucket grid for a single world.
#[derive(Debug, Default)]
struct WorldGrid {
    cells: HashMap<Cell, Vec<ClaimId>>,
    oversize: Vec<(ClaimId, Area)>,
}

impl WorldGrid {
    fn add(&mut self, id: ClaimId, area: &Area) {
        if is_oversize(area) {
            self.oversize.push((id, *area));
            return;
        }
        for cell in cells_covering(area) {
            self.cells.entry(cell).or_default().push(id);
        }
    }

    fn remove(&mut self, id: ClaimId, area: &Area) {
        if is_oversize(area) {
            self.oversize.retain(|(other, _)| *other != id);
            return;
        }
        for cell in cells_covering(area) {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    fn at(&self, x: i32, z: i32) -> impl Iterator<Item = ClaimId> + '_ {
        let bucket = self
            .cells
            .get(&cell_of(x, z))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        bucket.iter().copied().chain(
            self.oversize
                .iter()
                .filter(move |(_, area)| area.contains(x, z))
                .map(|(id, _)| *id),
        )
    }

    fn candidates_in(&self, area: &Area) -> BTreeSet<ClaimId> {
        let mut found: BTreeSet<ClaimId> = self
            .oversize
            .iter()
            .filter(|(_, other)| other.overlaps(area))
            .map(|(id, _)| *id)
            .collect();

        // A huge query walks the occupied buckets rather than every bucket
        // in range.
        let (w, h) = cell_span(area);
        if w.saturating_mul(h) <= self.cells.len() as i64 {
            found.extend(
                cells_covering(area)
                    .filter_map(|cell| self.cells.get(&cell))
                    .flatten()
                    .copied(),
            );
        } else {
            let ((x0, z0), (x1, z1)) = cell_bounds(area);
            found.extend(
                self.cells
                    .iter()
                    .filter(|((cx, cz), _)| (x0..=x1).contains(cx) && (z0..=z1).contains(cz))
                    .flat_map(|(_, ids)| ids.iter().copied()),
            );
        }
        found
    }
}

/// Owns every claim and answers point, rectangle, and owner queries.
///
/// Invariant: no two claims in the same world have overlapping areas.
/// [`insert`](Self::insert) and [`resize`](Self::resize) check it on every
/// call.
#[derive(Debug, Default)]
pub struct ClaimIndex {
    claims: HashMap<ClaimId, Claim>,
    worlds: HashMap<String, WorldGrid>,
    next_id: u32,
}

impl ClaimIndex {
    pub fn new() -> Self {
        Self {
            claims: HashMap::new(),
            worlds: HashMap::new(),
            next_id: 1,
        }
    }

    /// Adds an existing claim (e.g. loaded from storage).
    ///
    /// # Errors
    /// - [`ClaimError::DuplicateId`] if the id is taken.
    /// - [`ClaimError::MissingWorld`] if the world name is empty.
    /// - [`ClaimError::Overlap`] if the area overlaps another claim in the
    ///   same world.
    pub fn insert(&mut self, claim: Claim) -> Result<ClaimId, ClaimError> {
        let id = claim.id();
        if self.claims.contains_key(&id) {
            return Err(ClaimError::DuplicateId(id));
        }
        if claim.world().is_empty() {
            return Err(ClaimError::MissingWorld(id));
        }
        if let Some(existing) = self.first_overlap(claim.world(), claim.area(), None) {
            return Err(ClaimError::Overlap { claim: id, existing });
        }

        self.worlds
            .entry(claim.world().to_string())
            .or_default()
            .add(id, claim.area());
        self.next_id = self.next_id.max(id.0.saturating_add(1));

        tracing::info!(
            claim_id = %id,
            world = claim.world(),
            size = claim.area().size(),
            "claim inserted"
        );
        self.claims.insert(id, claim);
        Ok(id)
    }

    /// Creates a player-owned claim with the next free id.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert).
    pub fn create(
        &mut self,
        world: &str,
        area: Area,
        owner: PlayerId,
        owner_name: &str,
    ) -> Result<ClaimId, ClaimError> {
        let id = ClaimId(self.next_id.max(1));
        self.insert(Claim::new(id, world, area, owner, owner_name))
    }

    /// Creates a server-owned claim with the next free id.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert).
    pub fn create_admin(&mut self, world: &str, area: Area) -> Result<ClaimId, ClaimError> {
        let id = ClaimId(self.next_id.max(1));
        self.insert(Claim::admin(id, world, area))
    }

    /// Removes a claim. Sessions that cached its id will miss it on their
    /// next lookup and fall back to a fresh query.
    pub fn remove(&mut self, id: ClaimId) -> Option<Claim> {
        let claim = self.claims.remove(&id)?;
        if let Some(grid) = self.worlds.get_mut(claim.world()) {
            grid.remove(id, claim.area());
        }
        tracing::info!(claim_id = %id, "claim removed");
        Some(claim)
    }

    pub fn get(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.get(&id)
    }

    /// Mutable access for trust, settings, name, and quota changes. The
    /// area is not writable through this.
    pub fn get_mut(&mut self, id: ClaimId) -> Option<&mut Claim> {
        self.claims.get_mut(&id)
    }

    /// `true` while the claim still exists.
    pub fn is_valid(&self, id: ClaimId) -> bool {
        self.claims.contains_key(&id)
    }

    // -- Queries --

    pub fn claim_at(&self, world: &str, x: i32, z: i32) -> Option<&Claim> {
        let grid = self.worlds.get(world)?;
        grid.at(x, z)
            .filter_map(|id| self.claims.get(&id))
            .find(|claim| claim.area().contains(x, z))
    }

    pub fn claim_at_location(&self, location: &Location) -> Option<&Claim> {
        self.claim_at(&location.world, location.block_x(), location.block_z())
    }

    pub fn claim_at_block(&self, block: &BlockVector) -> Option<&Claim> {
        self.claim_at(&block.world, block.x, block.z)
    }

    /// Every claim in `world` whose area overlaps `area`, by ascending id.
    pub fn claims_in(&self, world: &str, area: &Area) -> Vec<&Claim> {
        let Some(grid) = self.worlds.get(world) else {
            return Vec::new();
        };
        grid.candidates_in(area)
            .into_iter()
            .filter_map(|id| self.claims.get(&id))
            .filter(|claim| claim.area().overlaps(area))
            .collect()
    }

    /// Claims owned by `player`, by ascending id, so the "first" claim is
    /// always the oldest one.
    pub fn claims_owned_by(&self, player: PlayerId) -> Vec<&Claim> {
        let mut owned: Vec<&Claim> = self
            .claims
            .values()
            .filter(|claim| claim.is_owner(player))
            .collect();
        owned.sort_by_key(|claim| claim.id());
        owned
    }

    // -- Area changes --

    /// Moves a claim to a new area.
    ///
    /// # Errors
    /// - [`ClaimError::NotFound`] if the claim does not exist.
    /// - [`ClaimError::Overlap`] if the new area would overlap a different
    ///   claim. The claim is left untouched.
    pub fn resize(&mut self, id: ClaimId, area: Area) -> Result<(), ClaimError> {
        let (world, old_area) = {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound(id))?;
            (claim.world().to_string(), *claim.area())
        };
        if let Some(existing) = self.first_overlap(&world, &area, Some(id)) {
            return Err(ClaimError::Overlap { claim: id, existing });
        }

        let grid = self.worlds.entry(world).or_default();
        grid.remove(id, &old_area);
        grid.add(id, &area);
        if let Some(claim) = self.claims.get_mut(&id) {
            claim.set_area(area);
        }
        tracing::debug!(claim_id = %id, size = area.size(), "claim resized");
        Ok(())
    }

    /// Grows a claim by one block on every side, if the quota pays for it
    /// and no neighbour is in the way. Returns `true` when it grew.
    pub fn auto_grow(&mut self, id: ClaimId) -> bool {
        let Some(claim) = self.claims.get(&id) else {
            return false;
        };
        let grown = claim.area().outset(1);
        if grown.size() > claim.blocks() {
            return false;
        }
        match self.resize(id, grown) {
            Ok(()) => {
                tracing::info!(claim_id = %id, size = grown.size(), "claim grew automatically");
                true
            }
            Err(e) => {
                tracing::debug!(claim_id = %id, error = %e, "auto-grow blocked");
                false
            }
        }
    }

    fn first_overlap(
        &self,
        world: &str,
        area: &Area,
        ignore: Option<ClaimId>,
    ) -> Option<ClaimId> {
        self.claims_in(world, area)
            .into_iter()
            .map(Claim::id)
            .find(|id| Some(*id) != ignore)
    }

    // -- Bookkeeping --

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }
}
