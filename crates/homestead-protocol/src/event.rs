//! Typed events emitted at well-defined points of a command or tick.
//!
//! Events are fire-and-forget: the core hands one to the host's event
//! sink and never looks at what happens next. Other plugins (quests,
//! achievements, analytics) listen for them.
//!
//! `#[serde(tag = "type")]` produces the internally tagged form
//! `{ "type": "SetNamedHome", "player": "…", "name": "base" }`, which is
//! what cross-plugin listeners expect.

use serde::{Deserialize, Serialize};

use crate::{ClaimId, Location, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PluginEvent {
    // -- Homes --
    ListHomes {
        player: PlayerId,
        count: usize,
    },
    SetPrimaryHome {
        player: PlayerId,
    },
    SetNamedHome {
        player: PlayerId,
        name: String,
    },
    UsePrimaryHome {
        player: PlayerId,
        location: Location,
    },
    UseNamedHome {
        player: PlayerId,
        name: Option<String>,
        location: Location,
    },
    /// Someone used another player's home through an invite.
    VisitHome {
        player: PlayerId,
        owner: PlayerId,
        name: Option<String>,
        location: Location,
    },
    VisitPublicHome {
        player: PlayerId,
        owner: PlayerId,
        name: String,
        location: Location,
    },
    ViewPublicHomes {
        player: PlayerId,
    },
    InviteHome {
        player: PlayerId,
        target: PlayerId,
        name: Option<String>,
    },
    UninviteHome {
        player: PlayerId,
        target: PlayerId,
        name: Option<String>,
    },
    DeleteHome {
        player: PlayerId,
        name: Option<String>,
    },

    // -- Claims --
    ClaimEntered {
        player: PlayerId,
        claim: ClaimId,
    },
    ClaimExited {
        player: PlayerId,
        claim: ClaimId,
    },
}

impl PluginEvent {
    /// The player who caused the event.
    pub fn player(&self) -> PlayerId {
        match self {
            Self::ListHomes { player, .. }
            | Self::SetPrimaryHome { player }
            | Self::SetNamedHome { player, .. }
            | Self::UsePrimaryHome { player, .. }
            | Self::UseNamedHome { player, .. }
            | Self::VisitHome { player, .. }
            | Self::VisitPublicHome { player, .. }
            | Self::ViewPublicHomes { player }
            | Self::InviteHome { player, .. }
            | Self::UninviteHome { player, .. }
            | Self::DeleteHome { player, .. }
            | Self::ClaimEntered { player, .. }
            | Self::ClaimExited { player, .. } => *player,
        }
    }
}
