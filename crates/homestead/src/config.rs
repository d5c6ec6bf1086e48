//! Homestead configuration, loaded from `homestead.toml`.
//!
//! Every field has a default, so an empty or missing file yields a
//! working single-server setup with no home worlds.

use std::io;
use std::path::{Path, PathBuf};

use homestead_home::{HomeWorld, HomeWorlds};
use homestead_session::SessionConfig;
use homestead_tick::TickConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level config file layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HomesteadConfig {
    /// Server id of this game server, as the proxy knows it.
    pub this_server: String,
    /// Two homes of one owner must be at least this many blocks apart on
    /// some axis.
    pub home_margin: i32,
    /// Lines per page in long listings.
    pub page_len: usize,
    /// Worlds that accept homes and claims, across the whole network.
    pub worlds: Vec<HomeWorld>,
    pub session: SessionConfig,
    pub tick: TickConfig,
}

impl Default for HomesteadConfig {
    fn default() -> Self {
        Self {
            this_server: "local".to_string(),
            home_margin: 64,
            page_len: 9,
            worlds: Vec::new(),
            session: SessionConfig::default(),
            tick: TickConfig::default(),
        }
    }
}

impl HomesteadConfig {
    /// Reads the config at `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    /// [`ConfigError::Read`] for any other I/O failure,
    /// [`ConfigError::Parse`] for malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml_str(&text)?;
                tracing::info!(path = %path.display(), worlds = config.worlds.len(), "config loaded");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn home_worlds(&self) -> HomeWorlds {
        HomeWorlds::new(self.this_server.clone(), self.worlds.clone())
    }
}
