//! Per-claim boolean toggles.

use serde::{Deserialize, Serialize};

/// A switch the owner can flip on a claim. Unset settings fall back to
/// [`ClaimSetting::default_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimSetting {
    Pvp,
    Explosions,
    Fire,
    /// Grow the claim outward while the owner stands inside and the block
    /// quota exceeds the current size.
    Autogrow,
    /// Allow elytra gliding inside the claim.
    Elytra,
    /// Suppress the enter/leave messages.
    Hidden,
    /// Highlight the border when someone enters or leaves.
    ShowBorders,
}

impl ClaimSetting {
    pub const ALL: [Self; 7] = [
        Self::Pvp,
        Self::Explosions,
        Self::Fire,
        Self::Autogrow,
        Self::Elytra,
        Self::Hidden,
        Self::ShowBorders,
    ];

    pub fn default_value(self) -> bool {
        match self {
            Self::Autogrow | Self::Elytra => true,
            Self::Pvp | Self::Explosions | Self::Fire | Self::Hidden | Self::ShowBorders => false,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pvp => "PvP Combat",
            Self::Explosions => "Explosion Damage",
            Self::Fire => "Fire Spread",
            Self::Autogrow => "Grow Automatically",
            Self::Elytra => "Elytra Flight",
            Self::Hidden => "Hide Enter/Leave Messages",
            Self::ShowBorders => "Show Borders on Enter/Leave",
        }
    }
}
