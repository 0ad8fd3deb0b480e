//! Faction identifiers.
//!
//! Factions are opaque integer ids supplied by the data feed. Id 0 is
//! reserved for unclaimed territory and never counts as an enemy of anyone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the faction holding a territory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FactionId(pub u32);

impl FactionId {
    /// Unclaimed territory.
    pub const NONE: FactionId = FactionId(0);

    pub const CALDARI_STATE: FactionId = FactionId(500001);
    pub const MINMATAR_REPUBLIC: FactionId = FactionId(500002);
    pub const AMARR_EMPIRE: FactionId = FactionId(500003);
    pub const GALLENTE_FEDERATION: FactionId = FactionId(500004);

    /// Returns true if this is the unclaimed sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns true if a real faction holds the territory.
    pub const fn is_claimed(self) -> bool {
        self.0 != 0
    }

    /// Two claimed factions that differ are enemies. Unclaimed is nobody's enemy.
    pub const fn is_enemy_of(self, other: FactionId) -> bool {
        self.is_claimed() && other.is_claimed() && self.0 != other.0
    }

    /// Display name for the well-known factions.
    pub const fn known_name(self) -> Option<&'static str> {
        match self.0 {
            500001 => Some("Caldari State"),
            500002 => Some("Minmatar Republic"),
            500003 => Some("Amarr Empire"),
            500004 => Some("Gallente Federation"),
            _ => None,
        }
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("unclaimed");
        }
        match self.known_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "faction {}", self.0),
        }
    }
}
