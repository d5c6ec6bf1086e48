//! Graded trust levels a claim owner hands out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much a player may do inside a claim.
///
/// Variants are declared from least to most trusted and the derived
/// `Ord` follows that order, so "at least Build" is simply
/// `trust >= TrustType::Build`. Every capability check below is written
/// that way, which is what makes raising a player's trust monotonic: it
/// can only ever unlock more.
///
/// ```text
/// Ban < None < Interact < Container < Build < CoOwner < Owner
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrustType {
    /// Explicitly banned: may not even stand inside the claim.
    Ban,
    /// No grant. The default for anyone without an entry.
    None,
    /// Doors, buttons, levers.
    Interact,
    /// Chests and other containers, plus everything above.
    Container,
    /// Place and break blocks.
    Build,
    /// Build plus managing trust of others.
    CoOwner,
    /// Reserved for the claim owner; never stored as an explicit entry.
    Owner,
}

impl TrustType {
    /// The maximal level, always resolved for the owner.
    pub const MAX: Self = Self::Owner;

    pub fn is_ban(self) -> bool {
        matches!(self, Self::Ban)
    }

    pub fn can_interact(self) -> bool {
        self >= Self::Interact
    }

    pub fn can_open_containers(self) -> bool {
        self >= Self::Container
    }

    pub fn can_build(self) -> bool {
        self >= Self::Build
    }

    pub fn is_co_owner(self) -> bool {
        self >= Self::CoOwner
    }

    pub fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Parses the names players type in commands; case-insensitive and
    /// accepts a few aliases.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ban" | "banned" => Some(Self::Ban),
            "none" => Some(Self::None),
            "interact" => Some(Self::Interact),
            "container" | "chest" => Some(Self::Container),
            "build" => Some(Self::Build),
            "coowner" | "co_owner" | "co-owner" => Some(Self::CoOwner),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ban => "Banned",
            Self::None => "None",
            Self::Interact => "Interact",
            Self::Container => "Container",
            Self::Build => "Build",
            Self::CoOwner => "Co-Owner",
            Self::Owner => "Owner",
        }
    }
}

impl fmt::Display for TrustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TrustType; 7] = [
        TrustType::Ban,
        TrustType::None,
        TrustType::Interact,
        TrustType::Container,
        TrustType::Build,
        TrustType::CoOwner,
        TrustType::Owner,
    ];

    #[test]
    fn test_order_follows_declaration() {
        for pair in ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_can_build_threshold_is_build() {
        assert!(!TrustType::Container.can_build());
        assert!(TrustType::Build.can_build());
        assert!(TrustType::CoOwner.can_build());
        assert!(TrustType::Owner.can_build());
    }

    #[test]
    fn test_is_ban_only_for_ban() {
        assert!(TrustType::Ban.is_ban());
        assert!(ALL.iter().skip(1).all(|t| !t.is_ban()));
        assert!(!TrustType::Ban.can_interact());
    }

    #[test]
    fn test_from_str_loose_accepts_aliases() {
        assert_eq!(TrustType::from_str_loose("CHEST"), Some(TrustType::Container));
        assert_eq!(TrustType::from_str_loose("co-owner"), Some(TrustType::CoOwner));
        assert_eq!(TrustType::from_str_loose("banned"), Some(TrustType::Ban));
        assert_eq!(TrustType::from_str_loose("admin"), None);
    }
}
