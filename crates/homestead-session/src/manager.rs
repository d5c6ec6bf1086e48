//! The session manager: one session per connected player.
//!
//! # Concurrency note
//!
//! `SessionManager` is NOT thread-safe by itself. It is a plain `HashMap`
//! owned by the Homestead state, which sits behind one lock. Ticks and
//! commands therefore never touch the same session concurrently.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use homestead_protocol::{PlayerId, PlayerView};

use crate::{Session, SessionConfig, SessionError, SessionHost, TickContext};

/// Registry of live sessions.
///
/// ```text
/// join ──→ create() ──→ tick_all() every tick ──→ remove() on quit
///                                                    │
///                                                    ▼
///                                          disable(): pending slots
///                                          dropped, never run
/// ```
pub struct SessionManager {
    sessions: HashMap<PlayerId, Session>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Creates the session for a joining player.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyConnected`] if the player already
    /// has one.
    pub fn create(&mut self, player_id: PlayerId) -> Result<&mut Session, SessionError> {
        match self.sessions.entry(player_id) {
            Entry::Occupied(_) => Err(SessionError::AlreadyConnected(player_id)),
            Entry::Vacant(slot) => {
                tracing::info!(%player_id, "session created");
                Ok(slot.insert(Session::new(player_id, self.config.clone())))
            }
        }
    }

    /// Discards a leaving player's session after clearing its pending
    /// callbacks.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if there is none.
    pub fn remove(&mut self, player_id: PlayerId) -> Result<Session, SessionError> {
        let mut session = self
            .sessions
            .remove(&player_id)
            .ok_or(SessionError::NotFound(player_id))?;
        session.disable();
        tracing::info!(%player_id, "session removed");
        Ok(session)
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&Session> {
        self.sessions.get(player_id)
    }

    pub fn get_mut(&mut self, player_id: &PlayerId) -> Option<&mut Session> {
        self.sessions.get_mut(player_id)
    }

    /// Ticks the session of every listed player, in order. Players without
    /// a session are skipped.
    pub fn tick_all<H: SessionHost>(&mut self, players: &[PlayerView], ctx: &mut TickContext<'_, H>) {
        for player in players {
            if let Some(session) = self.sessions.get_mut(&player.id) {
                session.tick(player, ctx);
            }
        }
    }

    /// Clears every session's pending slots. Used at shutdown.
    pub fn disable_all(&mut self) {
        for session in self.sessions.values_mut() {
            session.disable();
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
