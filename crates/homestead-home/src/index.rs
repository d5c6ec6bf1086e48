//! All homes of all players, with the lookups the home commands need.
//!
//! Homes are keyed by id in a `BTreeMap` so every listing comes out in a
//! stable order without extra sorting.
//!
//! Invariants held here:
//! - per owner, at most one home has no name (the primary);
//! - per owner, names are unique;
//! - a public alias is unique across all homes.

use std::collections::BTreeMap;

use homestead_protocol::{HomeId, Location, PlayerId};

use crate::{Home, HomeError};

#[derive(Debug)]
pub struct HomeIndex {
    homes: BTreeMap<HomeId, Home>,
    next_id: u32,
}

impl Default for HomeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeIndex {
    pub fn new() -> Self {
        Self {
            homes: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Adds a home loaded from storage.
    ///
    /// # Errors
    /// - [`HomeError::DuplicateId`] if the id is taken, or the owner
    ///   already has a home with the same name.
    /// - [`HomeError::PublicNameTaken`] if its alias is already used.
    pub fn insert(&mut self, home: Home) -> Result<HomeId, HomeError> {
        let id = home.id();
        if self.homes.contains_key(&id) {
            return Err(HomeError::DuplicateId(id));
        }
        if let Some(existing) = self.find(home.owner(), home.name()) {
            return Err(HomeError::DuplicateId(existing.id()));
        }
        if let Some(alias) = home.public_name() {
            if self.find_public(alias).is_some() {
                return Err(HomeError::PublicNameTaken(alias.to_string()));
            }
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.homes.insert(id, home);
        Ok(id)
    }

    /// Sets the owner's home called `name` to `location`, creating it if
    /// it does not exist. Returns the id and whether it was created.
    pub fn upsert(
        &mut self,
        owner: PlayerId,
        owner_name: &str,
        name: Option<&str>,
        location: &Location,
    ) -> (HomeId, bool) {
        let existing = self.find(owner, name).map(Home::id);
        if let Some(id) = existing {
            if let Some(home) = self.homes.get_mut(&id) {
                home.set_location(location);
            }
            tracing::info!(home_id = %id, %owner, "home moved");
            return (id, false);
        }

        let id = HomeId(self.next_id);
        self.next_id += 1;
        let home = Home::new(id, owner, owner_name, name.map(String::from), location);
        self.homes.insert(id, home);
        tracing::info!(home_id = %id, %owner, name = name.unwrap_or("<primary>"), "home created");
        (id, true)
    }

    pub fn get(&self, id: HomeId) -> Option<&Home> {
        self.homes.get(&id)
    }

    /// Exact match on `(owner, name)`; `None` finds the primary home.
    pub fn find(&self, owner: PlayerId, name: Option<&str>) -> Option<&Home> {
        self.homes
            .values()
            .find(|home| home.is_owner(owner) && home.is_named(name))
    }

    /// The owner's homes, primary first, then by name.
    pub fn find_owned(&self, owner: PlayerId) -> Vec<&Home> {
        let mut owned: Vec<&Home> = self.homes.values().filter(|h| h.is_owner(owner)).collect();
        // `None < Some(_)`, so the primary sorts first.
        owned.sort_by(|a, b| a.name().cmp(&b.name()));
        owned
    }

    pub fn find_public(&self, alias: &str) -> Option<&Home> {
        self.homes
            .values()
            .find(|home| home.public_name() == Some(alias))
    }

    /// Another home of `owner` in `world` closer than `margin` blocks on
    /// both axes, ignoring the home called `name` (which is about to be
    /// moved anyway).
    pub fn find_nearby(
        &self,
        owner: PlayerId,
        world: &str,
        x: i32,
        z: i32,
        margin: i32,
        name: Option<&str>,
    ) -> Option<&Home> {
        self.homes.values().find(|home| {
            home.is_owner(owner)
                && home.is_in_world(world)
                && !home.is_named(name)
                && (x - home.x().floor() as i32).abs() < margin
                && (z - home.z().floor() as i32).abs() < margin
        })
    }

    /// Homes that `player` has been invited to, by id.
    pub fn invited_to(&self, player: PlayerId) -> Vec<&Home> {
        self.homes
            .values()
            .filter(|home| home.is_invited(player))
            .collect()
    }

    // -- Invites --

    /// Invites `player`. Returns `true` if the invite is new; inviting
    /// twice is not an error.
    ///
    /// # Errors
    /// [`HomeError::NotFound`] if the home does not exist.
    pub fn invite(&mut self, id: HomeId, player: PlayerId) -> Result<bool, HomeError> {
        let home = self.homes.get_mut(&id).ok_or(HomeError::NotFound(id))?;
        let added = home.invites_mut().insert(player);
        if added {
            tracing::info!(home_id = %id, invitee = %player, "home invite added");
        }
        Ok(added)
    }

    /// # Errors
    /// - [`HomeError::NotFound`] if the home does not exist.
    /// - [`HomeError::NotInvited`] if `player` holds no invite.
    pub fn uninvite(&mut self, id: HomeId, player: PlayerId) -> Result<(), HomeError> {
        let home = self.homes.get_mut(&id).ok_or(HomeError::NotFound(id))?;
        if !home.invites_mut().remove(&player) {
            return Err(HomeError::NotInvited { home: id, player });
        }
        tracing::info!(home_id = %id, invitee = %player, "home invite removed");
        Ok(())
    }

    // -- Public aliases --

    /// Publishes a home under `alias`, or under its own name when no alias
    /// is given. Returns the alias used.
    ///
    /// # Errors
    /// - [`HomeError::NotFound`] if the home does not exist.
    /// - [`HomeError::AlreadyPublic`] if it already has an alias.
    /// - [`HomeError::MissingPublicName`] for a primary home without alias.
    /// - [`HomeError::PublicNameTaken`] if another home uses the alias.
    pub fn make_public(&mut self, id: HomeId, alias: Option<&str>) -> Result<String, HomeError> {
        let home = self.homes.get(&id).ok_or(HomeError::NotFound(id))?;
        if let Some(current) = home.public_name() {
            return Err(HomeError::AlreadyPublic(current.to_string()));
        }
        let alias = alias
            .or(home.name())
            .ok_or(HomeError::MissingPublicName)?
            .to_string();
        if self.find_public(&alias).is_some() {
            return Err(HomeError::PublicNameTaken(alias));
        }

        if let Some(home) = self.homes.get_mut(&id) {
            home.set_public_name(alias.clone());
        }
        tracing::info!(home_id = %id, %alias, "home made public");
        Ok(alias)
    }

    /// Counts a visit by someone other than the owner. Returns `true` if
    /// it was counted.
    pub fn record_visit(&mut self, id: HomeId, visitor: PlayerId) -> bool {
        match self.homes.get_mut(&id) {
            Some(home) if !home.is_owner(visitor) => {
                home.add_visit();
                true
            }
            _ => false,
        }
    }

    /// Public homes, most visited first, ties broken by alias.
    pub fn public_homes_ranked(&self) -> Vec<&Home> {
        let mut public: Vec<&Home> = self
            .homes
            .values()
            .filter(|home| home.public_name().is_some())
            .collect();
        public.sort_by(|a, b| {
            b.visits()
                .cmp(&a.visits())
                .then_with(|| a.public_name().cmp(&b.public_name()))
        });
        public
    }

    pub fn remove(&mut self, id: HomeId) -> Option<Home> {
        let home = self.homes.remove(&id)?;
        tracing::info!(home_id = %id, owner = %home.owner(), "home deleted");
        Some(home)
    }

    pub fn len(&self) -> usize {
        self.homes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.homes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Home> {
        self.homes.values()
    }
}
