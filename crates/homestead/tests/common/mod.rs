//! Shared fixtures: a recording platform, an in-memory store, and a
//! Homestead wired to both.
//!
//! Worlds: `home` (this server, shown as "Home") and `mining` (hosted
//! on the `mining` server). Known players: Steve, Alex, Herobrine.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use homestead::prelude::*;

pub const STEVE: PlayerId = PlayerId::from_u128(1);
pub const ALEX: PlayerId = PlayerId::from_u128(2);
pub const HEROBRINE: PlayerId = PlayerId::from_u128(3);

const KNOWN: [(&str, PlayerId); 3] = [("Steve", STEVE), ("Alex", ALEX), ("Herobrine", HEROBRINE)];

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Message(PlayerId, String),
    ActionBar(PlayerId, String),
    Highlight(PlayerId, ClaimId),
    Kick(PlayerId, ClaimId),
    StopGliding(PlayerId),
    Emit(PluginEvent),
    Bring(PlayerId, Location),
    Dispatch(PlayerId, String, Vec<u8>),
    FindPlace(PlayerId),
}

pub struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    online: Mutex<Vec<PlayerView>>,
    /// Players that disconnect as soon as a teleport starts.
    vanishing: Mutex<HashSet<PlayerId>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            online: Mutex::new(Vec::new()),
            vanishing: Mutex::new(HashSet::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn messages_to(&self, player: PlayerId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Message(p, text) if p == player => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<PluginEvent> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Emit(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn set_online(&self, players: Vec<PlayerView>) {
        *self.online.lock().unwrap() = players;
    }

    pub fn vanish_on_teleport(&self, player: PlayerId) {
        self.vanishing.lock().unwrap().insert(player);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SessionHost for MockPlatform {
    fn kick(&self, player: &PlayerView, claim: &Claim) -> Location {
        self.record(Call::Kick(player.id, claim.id()));
        Location::new(claim.world(), 10_000.5, 64.0, 10_000.5)
    }

    fn send_action_bar(&self, player: PlayerId, text: &str) {
        self.record(Call::ActionBar(player, text.to_string()));
    }

    fn send_message(&self, player: PlayerId, text: &str) {
        self.record(Call::Message(player, text.to_string()));
    }

    fn highlight_claim(&self, player: PlayerId, claim: &Claim) {
        self.record(Call::Highlight(player, claim.id()));
    }

    fn stop_gliding(&self, player: PlayerId) {
        self.record(Call::StopGliding(player));
    }

    fn emit(&self, event: PluginEvent) {
        self.record(Call::Emit(event));
    }
}

impl Platform for MockPlatform {
    fn online_players(&self) -> Vec<PlayerView> {
        self.online.lock().unwrap().clone()
    }

    fn player_id_for_name(&self, name: &str) -> Option<PlayerId> {
        KNOWN.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
    }

    fn name_for_player(&self, player: PlayerId) -> Option<String> {
        KNOWN
            .iter()
            .find(|(_, id)| *id == player)
            .map(|(n, _)| n.to_string())
    }

    fn is_online(&self, player: PlayerId) -> bool {
        player != HEROBRINE
    }

    async fn bring(&self, player: PlayerId, location: Location) -> Option<PlayerId> {
        self.record(Call::Bring(player, location));
        tokio::task::yield_now().await;
        let gone = self.vanishing.lock().unwrap().contains(&player);
        (!gone).then_some(player)
    }

    async fn surface_location(&self, world: &str, x: i32, z: i32) -> Option<Location> {
        tokio::task::yield_now().await;
        Some(Location::new(world, x as f64 + 0.5, 70.0, z as f64 + 0.5))
    }

    fn dispatch_remote(&self, player: PlayerId, server: &str, payload: Vec<u8>) {
        self.record(Call::Dispatch(player, server.to_string(), payload));
    }

    fn find_place_to_build(&self, player: PlayerId) {
        self.record(Call::FindPlace(player));
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Insert(HomeId),
    Update(HomeId),
    PublicName(HomeId, String),
    Visits(HomeId, u32),
    Delete(HomeId),
    SaveInvite(HomeInvite),
    DeleteInvite(HomeInvite),
}

#[derive(Default)]
pub struct MemoryStore {
    writes: Mutex<Vec<Write>>,
}

impl MemoryStore {
    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, write: Write) {
        self.writes.lock().unwrap().push(write);
    }
}

impl HomeStore for MemoryStore {
    fn insert_home(&self, home: &Home) {
        self.record(Write::Insert(home.id()));
    }

    fn update_home(&self, home: &Home) {
        self.record(Write::Update(home.id()));
    }

    fn save_public_name(&self, home: &Home) {
        let alias = home.public_name().unwrap_or_default().to_string();
        self.record(Write::PublicName(home.id(), alias));
    }

    fn save_visits(&self, home: &Home) {
        self.record(Write::Visits(home.id(), home.visits()));
    }

    fn delete_home(&self, home: HomeId) {
        self.record(Write::Delete(home));
    }

    fn save_invite(&self, invite: HomeInvite) {
        self.record(Write::SaveInvite(invite));
    }

    fn delete_invite(&self, invite: HomeInvite) {
        self.record(Write::DeleteInvite(invite));
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

pub type TestHomestead = Homestead<MockPlatform, MemoryStore>;

pub fn config() -> HomesteadConfig {
    HomesteadConfig {
        this_server: "survival".into(),
        worlds: vec![
            HomeWorld::new("home", "survival").with_display_name("Home"),
            HomeWorld::new("mining", "mining"),
        ],
        ..HomesteadConfig::default()
    }
}

/// A Homestead where Steve, Alex and Herobrine all have sessions.
pub fn homestead() -> TestHomestead {
    let mut homestead = Homestead::new(config(), MockPlatform::new(), MemoryStore::default());
    for (_, id) in KNOWN {
        homestead.player_joined(id).unwrap();
    }
    homestead
}

pub fn at(world: &str, x: f64, z: f64) -> Location {
    Location::new(world, x, 64.0, z)
}

pub fn steve_at(x: f64, z: f64) -> PlayerView {
    PlayerView::new(STEVE, "Steve", at("home", x, z))
}

pub fn alex_at(x: f64, z: f64) -> PlayerView {
    PlayerView::new(ALEX, "Alex", at("home", x, z))
}

/// Adds a claim owned by `owner` covering `x1..=x2, z1..=z2` in `home`.
pub fn add_claim(
    homestead: &mut TestHomestead,
    owner: PlayerId,
    owner_name: &str,
    (x1, z1, x2, z2): (i32, i32, i32, i32),
) -> ClaimId {
    homestead
        .claims_mut()
        .create("home", Area::new(x1, z1, x2, z2), owner, owner_name)
        .unwrap()
}

/// Adds a home directly, bypassing the `set_home` checks.
pub fn load_home(
    homestead: &mut TestHomestead,
    id: u32,
    owner: PlayerId,
    owner_name: &str,
    name: Option<&str>,
    location: Location,
) -> HomeId {
    let home = Home::new(HomeId(id), owner, owner_name, name.map(String::from), &location);
    homestead.load_home(home).unwrap()
}
