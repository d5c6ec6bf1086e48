//! Which worlds accept homes and claims, and which server hosts them.
//!
//! A network runs several game servers behind one proxy. Every server
//! loads the same registry, so any of them can tell whether a home lives
//! locally or has to be reached by dispatching the command elsewhere.

use serde::{Deserialize, Serialize};

/// One world that accepts homes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeWorld {
    pub world: String,
    /// Server id of the game server hosting this world.
    pub server: String,
    /// Name shown to players. Falls back to `world` when absent.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl HomeWorld {
    pub fn new(world: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            world: world.into(),
            server: server.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// The home-world registry, seen from one server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeWorlds {
    this_server: String,
    worlds: Vec<HomeWorld>,
}

impl HomeWorlds {
    pub fn new(this_server: impl Into<String>, worlds: Vec<HomeWorld>) -> Self {
        Self {
            this_server: this_server.into(),
            worlds,
        }
    }

    pub fn this_server(&self) -> &str {
        &self.this_server
    }

    pub fn get(&self, world: &str) -> Option<&HomeWorld> {
        self.worlds.iter().find(|w| w.world == world)
    }

    /// `true` for any registered world, wherever it is hosted. Sessions
    /// only track claims in these.
    pub fn is_home_world(&self, world: &str) -> bool {
        self.get(world).is_some()
    }

    /// `true` if the world is registered and hosted by this server.
    pub fn is_local_home_world(&self, world: &str) -> bool {
        self.get(world)
            .is_some_and(|w| w.server == self.this_server)
    }

    /// The hosting server, if that is not this one.
    pub fn remote_server_for(&self, world: &str) -> Option<&str> {
        self.get(world)
            .filter(|w| w.server != self.this_server)
            .map(|w| w.server.as_str())
    }

    pub fn server_for(&self, world: &str) -> Option<&str> {
        self.get(world).map(|w| w.server.as_str())
    }

    pub fn display_name<'a>(&'a self, world: &'a str) -> &'a str {
        self.get(world)
            .and_then(|w| w.display_name.as_deref())
            .unwrap_or(world)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HomeWorld> {
        self.worlds.iter()
    }
}
