//! The shared Homestead state.
//!
//! ```text
//!                    Arc<Mutex<Homestead>>
//!                   ┌──────────────────────┐
//!   tick driver ───►│ claims   ClaimIndex  │◄─── commands
//!                   │ homes    HomeIndex   │
//!   join / quit ───►│ sessions SessionMgr  │◄─── interact events
//!                   │ worlds   HomeWorlds  │
//!                   └──────────┬───────────┘
//!                              │ side effects
//!                              ▼
//!                      Platform + HomeStore
//! ```
//!
//! One lock guards everything. A tick and a command never interleave, so
//! the claim index, the home index and the sessions are always seen in a
//! consistent state. The lock is never held across an `.await`; see
//! [`travel`](crate::travel) for how the async paths release it.

use std::sync::Arc;
use std::time::Instant;

use homestead_claim::{Actor, Claim, ClaimIndex};
use homestead_home::{Home, HomeIndex, HomeStore, HomeWorlds};
use homestead_protocol::{ClaimId, HomeId, JsonCodec, PlayerId, PlayerView, PluginEvent};
use homestead_session::{
    InteractEvent, Session, SessionManager, SidebarPanel, TickContext,
};
use tokio::sync::Mutex;

use crate::{HomesteadConfig, HomesteadError, Platform};

/// State shared between the tick driver and the command handlers.
pub type SharedHomestead<P, S> = Arc<Mutex<Homestead<P, S>>>;

/// Every claim, home and session on this server.
pub struct Homestead<P, S> {
    pub(crate) claims: ClaimIndex,
    pub(crate) homes: HomeIndex,
    pub(crate) worlds: HomeWorlds,
    pub(crate) sessions: SessionManager,
    pub(crate) config: HomesteadConfig,
    pub(crate) platform: Arc<P>,
    pub(crate) store: S,
    pub(crate) codec: JsonCodec,
}

impl<P: Platform, S: HomeStore> Homestead<P, S> {
    pub fn new(config: HomesteadConfig, platform: P, store: S) -> Self {
        Self {
            claims: ClaimIndex::new(),
            homes: HomeIndex::new(),
            worlds: config.home_worlds(),
            sessions: SessionManager::new(config.session.clone()),
            config,
            platform: Arc::new(platform),
            store,
            codec: JsonCodec,
        }
    }

    /// Wraps the state for sharing with the tick driver.
    pub fn into_shared(self) -> SharedHomestead<P, S> {
        Arc::new(Mutex::new(self))
    }

    // -- Loading ---------------------------------------------------------------

    /// Adds a claim read from storage.
    ///
    /// # Errors
    /// Whatever [`ClaimIndex::insert`] rejects.
    pub fn load_claim(&mut self, claim: Claim) -> Result<ClaimId, HomesteadError> {
        Ok(self.claims.insert(claim)?)
    }

    /// Adds a home read from storage. Nothing is written back.
    ///
    /// # Errors
    /// Whatever [`HomeIndex::insert`] rejects.
    pub fn load_home(&mut self, home: Home) -> Result<HomeId, HomesteadError> {
        Ok(self.homes.insert(home)?)
    }

    // -- Accessors -------------------------------------------------------------

    pub fn claims(&self) -> &ClaimIndex {
        &self.claims
    }

    /// Claim administration (trust, settings, new claims) goes through
    /// here. Sessions notice changes on their next tick.
    pub fn claims_mut(&mut self) -> &mut ClaimIndex {
        &mut self.claims
    }

    pub fn homes(&self) -> &HomeIndex {
        &self.homes
    }

    pub fn worlds(&self) -> &HomeWorlds {
        &self.worlds
    }

    pub fn config(&self) -> &HomesteadConfig {
        &self.config
    }

    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self, player: PlayerId) -> Option<&Session> {
        self.sessions.get(&player)
    }

    pub fn session_mut(&mut self, player: PlayerId) -> Option<&mut Session> {
        self.sessions.get_mut(&player)
    }

    /// Permission subject for `player`, honouring their ignore-claims flag.
    pub(crate) fn actor(&self, player: PlayerId) -> Actor {
        self.sessions
            .get(&player)
            .map(Session::actor)
            .unwrap_or_else(|| Actor::new(player))
    }

    pub(crate) fn ignores_claims(&self, player: PlayerId) -> bool {
        self.actor(player).ignore_claims
    }

    pub(crate) fn tell(&self, player: PlayerId, text: &str) {
        self.platform.send_message(player, text);
    }

    pub(crate) fn emit(&self, event: PluginEvent) {
        self.platform.emit(event);
    }

    // -- Player lifecycle ------------------------------------------------------

    /// # Errors
    /// [`SessionError::AlreadyConnected`](homestead_session::SessionError::AlreadyConnected)
    /// on a duplicate join.
    pub fn player_joined(&mut self, player: PlayerId) -> Result<(), HomesteadError> {
        self.sessions.create(player)?;
        tracing::info!(%player, online = self.sessions.len(), "player joined");
        Ok(())
    }

    /// # Errors
    /// [`SessionError::NotFound`](homestead_session::SessionError::NotFound)
    /// if the player had no session.
    pub fn player_left(&mut self, player: PlayerId) -> Result<(), HomesteadError> {
        self.sessions.remove(player)?;
        tracing::info!(%player, online = self.sessions.len(), "player left");
        Ok(())
    }

    pub fn set_ignore_claims(&mut self, player: PlayerId, ignore: bool) -> bool {
        match self.sessions.get_mut(&player) {
            Some(session) => {
                session.set_ignore_claims(ignore);
                true
            }
            None => false,
        }
    }

    // -- Per-tick --------------------------------------------------------------

    /// Runs one tick for every player in `players` that has a session.
    pub fn tick(&mut self, players: &[PlayerView]) {
        self.tick_at(players, Instant::now());
    }

    pub fn tick_at(&mut self, players: &[PlayerView], now: Instant) {
        let mut ctx = TickContext {
            worlds: &self.worlds,
            claims: &mut self.claims,
            host: self.platform.as_ref(),
            now,
        };
        self.sessions.tick_all(players, &mut ctx);
    }

    /// The sidebar panel for `player`, if one should be shown.
    pub fn sidebar(&mut self, player: PlayerId) -> Option<SidebarPanel> {
        let session = self.sessions.get_mut(&player)?;
        session.sidebar(&self.claims)
    }

    /// Forwards a click to the player's pending interact callback.
    pub fn on_interact(&mut self, event: &InteractEvent) -> bool {
        match self.sessions.get_mut(&event.player) {
            Some(session) => session.on_interact(&mut self.claims, event),
            None => false,
        }
    }

    /// `/homestead confirm`. Returns `false` when nothing was pending.
    pub fn confirm(&mut self, player: PlayerId) -> bool {
        match self.sessions.get_mut(&player) {
            Some(session) => session.confirm_command(&mut self.claims, self.platform.as_ref()),
            None => false,
        }
    }

    /// `/homestead cancel`. Returns `false` when nothing was pending.
    pub fn cancel(&mut self, player: PlayerId) -> bool {
        match self.sessions.get_mut(&player) {
            Some(session) => session.cancel_command(self.platform.as_ref()),
            None => false,
        }
    }
}
