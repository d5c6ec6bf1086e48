//! Session types: one player's claim tracking and pending interactions.
//!
//! A session is created when a player joins and dropped when they leave.
//! Nothing in it is persisted. It tracks:
//! - WHICH claim the player stood in on the last tick (by id only)
//! - HOW LONG they have been ticked, for periodic claim actions
//! - WHEN the last throttled notification went out
//! - WHAT the player still has to confirm, or which tool wants their clicks

use std::time::{Duration, Instant};

use homestead_claim::{Actor, Claim, ClaimIndex, ClaimSetting};
use homestead_home::HomeWorlds;
use homestead_protocol::{ClaimId, Location, PlayerId, PlayerView, PluginEvent, Warning};
use serde::{Deserialize, Serialize};

use crate::{InteractCallback, InteractEvent, InteractResponse, SessionHost};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Timing knobs shared by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum gap between two throttled notifications.
    ///
    /// Default: 1000 ms.
    pub notify_cooldown_ms: u64,

    /// How often (in ticks) an owner standing in their claim may trigger
    /// auto-grow.
    ///
    /// Default: 100 ticks (5 seconds at 20 Hz).
    pub auto_grow_interval: u64,

    /// How many sidebar refreshes after a claim change still show the
    /// claim panel.
    ///
    /// Default: 300.
    pub sidebar_max_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notify_cooldown_ms: 1000,
            auto_grow_interval: 100,
            sidebar_max_ticks: 300,
        }
    }
}

impl SessionConfig {
    pub fn notify_cooldown(&self) -> Duration {
        Duration::from_millis(self.notify_cooldown_ms)
    }
}

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Everything a tick reads or writes besides the session itself.
pub struct TickContext<'a, H> {
    pub worlds: &'a HomeWorlds,
    pub claims: &'a mut ClaimIndex,
    pub host: &'a H,
    /// Clock reading for this tick. Throttling is measured against it.
    pub now: Instant,
}

/// A "/claim grow" that failed for lack of claim blocks.
///
/// Kept so that buying blocks right afterwards, without moving, can
/// finish the grow in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimGrowSnippet {
    pub world: String,
    pub x: i32,
    pub z: i32,
    pub claim_id: ClaimId,
}

impl ClaimGrowSnippet {
    /// `true` if `location` is in the very block column the grow was
    /// requested from.
    pub fn is_near(&self, location: &Location) -> bool {
        location.world == self.world && location.block_x() == self.x && location.block_z() == self.z
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SidebarPriority {
    Low,
    #[default]
    Default,
    High,
}

/// Lines for the sidebar renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarPanel {
    pub priority: SidebarPriority,
    pub lines: Vec<String>,
}

type ConfirmCallback = Box<dyn FnOnce(&mut ClaimIndex) -> Result<(), Warning> + Send>;

struct PendingConfirmation {
    message: String,
    callback: ConfirmCallback,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Runtime state of one connected player.
///
/// ## Claim tracking
///
/// ```text
///            enter (notify, sidebar reset)
///   NoClaim ───────────────────────────────▶ InClaim(c)
///      ▲    ◀───────────────────────────────    │ │
///      │      leave (notify, sidebar reset)      │ │ same claim:
///      │                                         │ │ auto-grow, elytra
///      │ world is not a home world               │ ◀┘
///      └─────────── (full reset) ◀───────────────┘
/// ```
///
/// A ban short-circuits both transitions: the player is kicked and the
/// claim is recomputed from where the kick put them, without an enter or
/// leave notification.
pub struct Session {
    player_id: PlayerId,
    current_claim: Option<ClaimId>,
    ticks: u64,
    sidebar_ticks: u32,
    notify_until: Option<Instant>,
    confirmation: Option<PendingConfirmation>,
    interact: Option<InteractCallback>,
    claim_grow_snippet: Option<ClaimGrowSnippet>,
    ignore_claims: bool,
    pages: Vec<String>,
    config: SessionConfig,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("player_id", &self.player_id)
            .field("current_claim", &self.current_claim)
            .field("ticks", &self.ticks)
            .field("sidebar_ticks", &self.sidebar_ticks)
            .field("pending_confirmation", &self.pending_confirmation())
            .field("has_interact_callback", &self.interact.is_some())
            .field("ignore_claims", &self.ignore_claims)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(player_id: PlayerId, config: SessionConfig) -> Self {
        Self {
            player_id,
            current_claim: None,
            ticks: 0,
            sidebar_ticks: 0,
            notify_until: None,
            confirmation: None,
            interact: None,
            claim_grow_snippet: None,
            ignore_claims: false,
            pages: Vec::new(),
            config,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// The claim the player stood in on the last processed tick. This is a
    /// lookup key only; the claim may have been deleted since.
    pub fn current_claim(&self) -> Option<ClaimId> {
        self.current_claim
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sidebar_ticks(&self) -> u32 {
        self.sidebar_ticks
    }

    pub fn set_sidebar_ticks(&mut self, ticks: u32) {
        self.sidebar_ticks = ticks;
    }

    pub fn ignore_claims(&self) -> bool {
        self.ignore_claims
    }

    pub fn set_ignore_claims(&mut self, ignore: bool) {
        self.ignore_claims = ignore;
    }

    /// The player as a permission subject.
    pub fn actor(&self) -> Actor {
        Actor {
            player: self.player_id,
            ignore_claims: self.ignore_claims,
        }
    }

    pub fn claim_grow_snippet(&self) -> Option<&ClaimGrowSnippet> {
        self.claim_grow_snippet.as_ref()
    }

    pub fn set_claim_grow_snippet(&mut self, snippet: Option<ClaimGrowSnippet>) {
        self.claim_grow_snippet = snippet;
    }

    pub fn take_claim_grow_snippet(&mut self) -> Option<ClaimGrowSnippet> {
        self.claim_grow_snippet.take()
    }

    // -- Tick ----------------------------------------------------------------

    /// Advances claim tracking by one server tick.
    pub fn tick<H: SessionHost>(&mut self, player: &PlayerView, ctx: &mut TickContext<'_, H>) {
        if player.is_spectator() {
            return;
        }
        if !ctx.worlds.is_home_world(&player.location.world) {
            if self.current_claim.is_some() || self.ticks != 0 {
                tracing::debug!(player_id = %self.player_id, "left home worlds, session reset");
            }
            self.current_claim = None;
            self.ticks = 0;
            self.sidebar_ticks = 0;
            return;
        }

        let old_claim = self.current_claim;
        let cached = old_claim.filter(|id| {
            ctx.claims
                .get(*id)
                .is_some_and(|claim| claim.contains_location(&player.location))
        });
        let resolved = match cached {
            Some(id) => Some(id),
            None => ctx
                .claims
                .claim_at_location(&player.location)
                .map(Claim::id),
        };

        let banned = resolved
            .and_then(|id| ctx.claims.get(id))
            .filter(|claim| claim.trust_type(self.player_id).is_ban());

        if let Some(claim) = banned {
            let landed = ctx.host.kick(player, claim);
            let msg = "You cannot enter this claim!";
            ctx.host.send_action_bar(self.player_id, msg);
            ctx.host.send_message(self.player_id, msg);
            ctx.host.highlight_claim(self.player_id, claim);
            tracing::info!(player_id = %self.player_id, claim_id = %claim.id(), "banned player kicked");
            self.current_claim = ctx.claims.claim_at_location(&landed).map(Claim::id);
            self.sidebar_ticks = 0;
        } else if resolved != old_claim {
            self.current_claim = resolved;
            self.notify_claim_change(old_claim, resolved, ctx);
            self.sidebar_ticks = 0;
        } else if let Some(id) = resolved {
            self.claim_actions(id, player, ctx);
        }

        self.ticks += 1;
    }

    fn claim_actions<H: SessionHost>(
        &mut self,
        id: ClaimId,
        player: &PlayerView,
        ctx: &mut TickContext<'_, H>,
    ) {
        let Some(claim) = ctx.claims.get(id) else {
            return;
        };
        let wants_grow = claim.is_owner(self.player_id)
            && claim.setting(ClaimSetting::Autogrow)
            && claim.blocks() > claim.area().size()
            && self.ticks % self.config.auto_grow_interval.max(1) == 0;
        let no_elytra = player.gliding && !claim.setting(ClaimSetting::Elytra);

        if wants_grow && ctx.claims.auto_grow(id) {
            if let Some(claim) = ctx.claims.get(id) {
                ctx.host.highlight_claim(self.player_id, claim);
            }
        }

        if no_elytra {
            ctx.host.stop_gliding(self.player_id);
            let msg = "You cannot fly in this claim!";
            if self.notify_at(ctx.now, ctx.host, msg) {
                ctx.host.send_message(self.player_id, msg);
                if let Some(claim) = ctx.claims.get(id) {
                    ctx.host.highlight_claim(self.player_id, claim);
                }
            }
        }
    }

    /// Announces a claim change. Exactly one of the leave or enter
    /// branches runs. Hidden claims still emit the event but show no
    /// message.
    fn notify_claim_change<H: SessionHost>(
        &self,
        old: Option<ClaimId>,
        new: Option<ClaimId>,
        ctx: &TickContext<'_, H>,
    ) {
        let (id, verb) = match (old, new) {
            (Some(old), None) => (old, "Leaving"),
            (_, Some(new)) => (new, "Entering"),
            (None, None) => return,
        };
        let Some(claim) = ctx.claims.get(id) else {
            tracing::debug!(player_id = %self.player_id, claim_id = %id, "claim vanished before notice");
            return;
        };

        let event = if new.is_some() {
            PluginEvent::ClaimEntered {
                player: self.player_id,
                claim: id,
            }
        } else {
            PluginEvent::ClaimExited {
                player: self.player_id,
                claim: id,
            }
        };
        tracing::debug!(player_id = %self.player_id, claim_id = %id, verb, "claim change");
        ctx.host.emit(event);

        if claim.setting(ClaimSetting::Hidden) {
            return;
        }
        let name_part = claim.name().map(|n| format!(" {n}")).unwrap_or_default();
        let message = if claim.is_owner(self.player_id) {
            format!("{verb} your claim{name_part}")
        } else {
            format!("{verb} {} claim{name_part}", claim.owner_genitive())
        };
        ctx.host.send_action_bar(self.player_id, &message);
        if claim.setting(ClaimSetting::ShowBorders) {
            ctx.host.highlight_claim(self.player_id, claim);
        }
    }

    // -- Throttled notifications -----------------------------------------------

    /// Delivers `text` to the action bar unless another throttled notice
    /// went out less than the cooldown ago. Returns whether it was shown.
    pub fn notify<H: SessionHost>(&mut self, host: &H, text: &str) -> bool {
        self.notify_at(Instant::now(), host, text)
    }

    /// [`notify`](Self::notify) with an explicit clock reading.
    pub fn notify_at<H: SessionHost>(&mut self, now: Instant, host: &H, text: &str) -> bool {
        if !self.try_start_cooldown(now) {
            return false;
        }
        host.send_action_bar(self.player_id, text);
        true
    }

    /// "This claim belongs to ..." on the shared cooldown. Used when a
    /// protected action is denied.
    pub fn notify_claim_owner<H: SessionHost>(&mut self, host: &H, claim: &Claim) -> bool {
        self.notify_claim_owner_at(Instant::now(), host, claim)
    }

    pub fn notify_claim_owner_at<H: SessionHost>(
        &mut self,
        now: Instant,
        host: &H,
        claim: &Claim,
    ) -> bool {
        let text = format!("This claim belongs to {}", claim.owner_name());
        self.notify_at(now, host, &text)
    }

    fn try_start_cooldown(&mut self, now: Instant) -> bool {
        if self.notify_until.is_some_and(|until| now < until) {
            return false;
        }
        self.notify_until = Some(now + self.config.notify_cooldown());
        true
    }

    // -- Confirmation slot -----------------------------------------------------

    /// Stores an action awaiting "confirm" or "cancel", replacing any
    /// previous one. The caller renders the prompt.
    pub fn require_confirmation<F>(&mut self, message: impl Into<String>, callback: F)
    where
        F: FnOnce(&mut ClaimIndex) -> Result<(), Warning> + Send + 'static,
    {
        let message = message.into();
        if self.confirmation.is_some() {
            tracing::debug!(player_id = %self.player_id, "pending confirmation replaced");
        }
        self.confirmation = Some(PendingConfirmation {
            message,
            callback: Box::new(callback),
        });
    }

    pub fn pending_confirmation(&self) -> Option<&str> {
        self.confirmation.as_ref().map(|p| p.message.as_str())
    }

    /// Runs and clears the pending action. A [`Warning`] from it goes to
    /// the player as a chat message. Returns `false` if nothing was
    /// pending.
    pub fn confirm_command<H: SessionHost>(&mut self, claims: &mut ClaimIndex, host: &H) -> bool {
        let Some(pending) = self.confirmation.take() else {
            return false;
        };
        if let Err(warning) = (pending.callback)(claims) {
            host.send_message(self.player_id, warning.message());
        }
        true
    }

    /// Drops the pending action without running it. Returns `false` if
    /// nothing was pending.
    pub fn cancel_command<H: SessionHost>(&mut self, host: &H) -> bool {
        let Some(pending) = self.confirmation.take() else {
            return false;
        };
        host.send_message(self.player_id, &format!("Cancelled: {}", pending.message));
        true
    }

    // -- Interaction slot ------------------------------------------------------

    pub fn set_interact_callback(&mut self, callback: Option<InteractCallback>) {
        self.interact = callback;
    }

    pub fn has_interact_callback(&self) -> bool {
        self.interact.is_some()
    }

    /// Forwards a raw interaction to the installed handler. Returns
    /// `true` if the handler consumed it.
    ///
    /// A failing handler is logged and uninstalled.
    pub fn on_interact(&mut self, claims: &mut ClaimIndex, event: &InteractEvent) -> bool {
        let Some(mut callback) = self.interact.take() else {
            return false;
        };
        match callback(claims, event) {
            Ok(InteractResponse::Finished) => true,
            Ok(response) => {
                self.interact = Some(callback);
                response.is_handled()
            }
            Err(e) => {
                tracing::error!(player_id = %self.player_id, error = %e, "interact callback failed");
                false
            }
        }
    }

    /// Clears every pending slot without running anything.
    pub fn disable(&mut self) {
        self.confirmation = None;
        self.interact = None;
    }

    // -- Pages -----------------------------------------------------------------

    pub fn set_pages(&mut self, pages: Vec<String>) {
        self.pages = pages;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn stored_page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    /// Sends page `index` (zero-based), followed by a "Showing page"
    /// footer unless it is the last one. Returns `false` if out of range.
    pub fn show_stored_page<H: SessionHost>(&self, host: &H, index: usize) -> bool {
        let Some(page) = self.stored_page(index) else {
            return false;
        };
        host.send_message(self.player_id, page);
        if index + 1 < self.pages.len() {
            let footer = format!(
                "Showing page {}/{} (/homes page {} for more)",
                index + 1,
                self.pages.len(),
                index + 2
            );
            host.send_message(self.player_id, &footer);
        }
        true
    }

    // -- Sidebar ---------------------------------------------------------------

    /// The claim panel, if it should be shown on this refresh. Each call
    /// counts as one sidebar tick.
    pub fn sidebar(&mut self, claims: &ClaimIndex) -> Option<SidebarPanel> {
        if self.ticks == 0 || self.sidebar_ticks > self.config.sidebar_max_ticks {
            return None;
        }
        self.sidebar_ticks += 1;

        let mut lines = vec!["Current /claim:".to_string()];
        match self.current_claim.and_then(|id| claims.get(id)) {
            None => lines.push(" None".to_string()),
            Some(claim) => {
                if claim.trust_type(self.player_id).can_build() {
                    lines.push(" Yours".to_string());
                } else {
                    lines.push(format!(" {}", claim.owner_genitive()));
                }
                if let Some(name) = claim.name() {
                    lines.push(format!(" {name}"));
                }
            }
        }
        Some(SidebarPanel {
            priority: SidebarPriority::Default,
            lines,
        })
    }
}
