//! `/home` and `/visit`: working out where a player should go, then
//! taking them there.
//!
//! Travel is split in two so the state lock is never held across an
//! `.await`:
//!
//! ```text
//!   resolve_home / resolve_visit        (sync, under the lock)
//!        │  every check, every Warning
//!        ▼
//!   Destination ──► travel()            (async, lock released)
//!                     │ surface_location().await   chunk load
//!                     │ bring().await              teleport
//!                     ▼
//!                   arrival message + event, visit counted (re-locks)
//! ```
//!
//! If the player disconnects while a chunk loads or the teleport runs,
//! the platform resolves to `None` and travel ends quietly with
//! [`TravelOutcome::Aborted`].

use std::sync::Arc;

use homestead_claim::can_build;
use homestead_home::{Home, HomeStore};
use homestead_protocol::{
    Codec, HomeId, Location, PlayerId, PlayerView, PluginEvent, RemoteCommand, Warning,
};

use crate::{Homestead, HomesteadError, Platform, SharedHomestead};

/// What happens once the player is standing at the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub message: String,
    pub event: Option<PluginEvent>,
    /// Public home whose visit counter goes up.
    pub visit: Option<HomeId>,
}

impl Arrival {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            event: None,
            visit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// The target world lives on another server; re-run the command there.
    Remote(RemoteCommand),
    Location { location: Location, arrival: Arrival },
    /// Centre of the player's first claim. The height is only known after
    /// the chunk is loaded.
    ClaimCenter { world: String, x: i32, z: i32 },
    /// No home and no claim: let the platform pick a spot.
    FindPlaceToBuild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelOutcome {
    Arrived,
    Dispatched,
    Delegated,
    Aborted,
}

fn home_not_found(name: Option<&str>) -> Warning {
    Warning::new(match name {
        Some(name) => format!("Home not found: {name}!"),
        None => "Home not found!".to_string(),
    })
}

impl<P: Platform, S: HomeStore> Homestead<P, S> {
    /// Where `/home [arg]` takes the player.
    ///
    /// `arg` is a home name of the player's own, or `owner:name` (or
    /// `owner:` for the primary home) for a home they were invited to.
    pub fn resolve_home(
        &self,
        player: &PlayerView,
        arg: Option<&str>,
    ) -> Result<Destination, Warning> {
        match arg {
            None => self.resolve_primary_home(player),
            Some(arg) => self.resolve_named_home(player, arg),
        }
    }

    fn resolve_primary_home(&self, player: &PlayerView) -> Result<Destination, Warning> {
        if let Some(home) = self.homes.find(player.id, None) {
            if let Some(server) = self.worlds.remote_server_for(home.world()) {
                return Ok(Destination::Remote(RemoteCommand::new(
                    player.id, "home", server,
                )));
            }
            self.check_home_claim(home, player.id, "This home location lacks build permission")?;
            let location = home.location();
            return Ok(Destination::Location {
                location: location.clone(),
                arrival: Arrival {
                    message: "Welcome home :)".to_string(),
                    event: Some(PluginEvent::UsePrimaryHome {
                        player: player.id,
                        location,
                    }),
                    visit: None,
                },
            });
        }

        if let Some(claim) = self.claims.claims_owned_by(player.id).first() {
            if let Some(server) = self.worlds.remote_server_for(claim.world()) {
                return Ok(Destination::Remote(RemoteCommand::new(
                    player.id, "home", server,
                )));
            }
            return Ok(Destination::ClaimCenter {
                world: claim.world().to_string(),
                x: claim.area().center_x(),
                z: claim.area().center_z(),
            });
        }

        Ok(Destination::FindPlaceToBuild)
    }

    fn resolve_named_home(&self, player: &PlayerView, arg: &str) -> Result<Destination, Warning> {
        let home = match arg.split_once(':') {
            Some((owner_name, name)) => {
                let owner = self
                    .platform
                    .player_id_for_name(owner_name)
                    .ok_or_else(|| Warning::new(format!("Player not found: {owner_name}")))?;
                let name = (!name.is_empty()).then_some(name);
                let home = self
                    .homes
                    .find(owner, name)
                    .ok_or_else(|| home_not_found(name))?;
                if !home.is_owner(player.id)
                    && !home.is_invited(player.id)
                    && !self.ignores_claims(player.id)
                {
                    return Err(home_not_found(name));
                }
                home
            }
            None => self
                .homes
                .find(player.id, Some(arg))
                .ok_or_else(|| Warning::new(format!("Home not found: {arg}")))?,
        };

        if let Some(server) = self.worlds.remote_server_for(home.world()) {
            return Ok(Destination::Remote(RemoteCommand::new(
                player.id,
                format!("home {arg}"),
                server,
            )));
        }
        if let Some(claim) = self.claims.claim_at_block(&home.block_vector()) {
            if !can_build(claim, home.owner(), false) {
                return Err(Warning::new("This home location lacks build permission"));
            }
        }

        let location = home.location();
        let name = home.name().map(String::from);
        let event = if home.is_owner(player.id) {
            PluginEvent::UseNamedHome {
                player: player.id,
                name,
                location: location.clone(),
            }
        } else {
            PluginEvent::VisitHome {
                player: player.id,
                owner: home.owner(),
                name,
                location: location.clone(),
            }
        };
        Ok(Destination::Location {
            location,
            arrival: Arrival {
                message: "Welcome home".to_string(),
                event: Some(event),
                visit: None,
            },
        })
    }

    /// Where `/visit <alias>` takes the player.
    pub fn resolve_visit(&self, player: &PlayerView, alias: &str) -> Result<Destination, Warning> {
        let home = self
            .homes
            .find_public(alias)
            .ok_or_else(|| Warning::new(format!("Public home not found: {alias}")))?;

        if let Some(server) = self.worlds.remote_server_for(home.world()) {
            return Ok(Destination::Remote(RemoteCommand::new(
                player.id,
                format!("visit {alias}"),
                server,
            )));
        }
        self.check_home_claim(home, player.id, "The invite is no longer valid in this claim")?;

        let location = home.location();
        Ok(Destination::Location {
            location: location.clone(),
            arrival: Arrival {
                message: format!(
                    "Teleported to {}'s public home \"{alias}\"",
                    home.owner_name()
                ),
                event: Some(PluginEvent::VisitPublicHome {
                    player: player.id,
                    owner: home.owner(),
                    name: alias.to_string(),
                    location,
                }),
                visit: Some(home.id()),
            },
        })
    }

    /// The claim under a home must still let its owner build, and must
    /// not ban the traveller.
    fn check_home_claim(
        &self,
        home: &Home,
        traveller: PlayerId,
        lacks_permission: &str,
    ) -> Result<(), Warning> {
        let Some(claim) = self.claims.claim_at_block(&home.block_vector()) else {
            return Ok(());
        };
        if !can_build(claim, home.owner(), false) {
            return Err(Warning::new(lacks_permission));
        }
        if claim.trust_type(traveller).is_ban() {
            return Err(Warning::new("You are banned from this claim"));
        }
        Ok(())
    }

    pub(crate) fn encode_remote(&self, command: &RemoteCommand) -> Result<Vec<u8>, HomesteadError> {
        command.validate()?;
        Ok(self.codec.encode(command)?)
    }
}

// ---------------------------------------------------------------------------
// Async side
// ---------------------------------------------------------------------------

/// `/home [arg]` end to end.
pub async fn home<P: Platform, S: HomeStore>(
    shared: &SharedHomestead<P, S>,
    player: &PlayerView,
    arg: Option<&str>,
) -> Result<TravelOutcome, Warning> {
    let destination = shared.lock().await.resolve_home(player, arg)?;
    Ok(travel(shared, player.id, destination).await)
}

/// `/visit <alias>` end to end.
pub async fn visit<P: Platform, S: HomeStore>(
    shared: &SharedHomestead<P, S>,
    player: &PlayerView,
    alias: &str,
) -> Result<TravelOutcome, Warning> {
    let destination = shared.lock().await.resolve_visit(player, alias)?;
    Ok(travel(shared, player.id, destination).await)
}

/// Takes the player to `destination`. Internal failures are logged and
/// reported as [`TravelOutcome::Aborted`]; the player sees nothing.
pub async fn travel<P: Platform, S: HomeStore>(
    shared: &SharedHomestead<P, S>,
    player: PlayerId,
    destination: Destination,
) -> TravelOutcome {
    match destination {
        Destination::Remote(command) => {
            let state = shared.lock().await;
            match state.encode_remote(&command) {
                Ok(payload) => {
                    state
                        .platform
                        .dispatch_remote(player, &command.server, payload);
                    tracing::info!(%player, server = %command.server, command = %command.command, "command sent to remote server");
                    TravelOutcome::Dispatched
                }
                Err(e) => {
                    tracing::error!(%player, error = %e, "cannot encode remote command");
                    TravelOutcome::Aborted
                }
            }
        }
        Destination::Location { location, arrival } => {
            arrive(shared, player, location, arrival).await
        }
        Destination::ClaimCenter { world, x, z } => {
            let platform = Arc::clone(shared.lock().await.platform());
            let Some(location) = platform.surface_location(&world, x, z).await else {
                tracing::debug!(%player, %world, x, z, "claim centre unavailable");
                return TravelOutcome::Aborted;
            };
            arrive(
                shared,
                player,
                location,
                Arrival::plain("Welcome to your claim. :)"),
            )
            .await
        }
        Destination::FindPlaceToBuild => {
            let platform = Arc::clone(shared.lock().await.platform());
            platform.find_place_to_build(player);
            TravelOutcome::Delegated
        }
    }
}

async fn arrive<P: Platform, S: HomeStore>(
    shared: &SharedHomestead<P, S>,
    player: PlayerId,
    location: Location,
    arrival: Arrival,
) -> TravelOutcome {
    let platform = Arc::clone(shared.lock().await.platform());
    let Some(arrived) = platform.bring(player, location).await else {
        tracing::debug!(%player, "player gone before arrival");
        return TravelOutcome::Aborted;
    };

    platform.send_message(arrived, &arrival.message);
    if let Some(event) = arrival.event {
        platform.emit(event);
    }
    if let Some(id) = arrival.visit {
        let mut state = shared.lock().await;
        if state.homes.record_visit(id, arrived) {
            if let Some(home) = state.homes.get(id) {
                state.store.save_visits(home);
            }
        }
    }
    TravelOutcome::Arrived
}
