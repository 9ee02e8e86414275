//! A single district of the settlement and its wall integrity.

use bastion_types::ZoneId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum wall integrity of any zone.
pub const MAX_INTEGRITY: u32 = 100;

/// Static definition of a zone, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Which zone this describes.
    pub id: ZoneId,
    /// Residents the zone can house without overcrowding.
    pub capacity: u32,
    /// Multiplier applied to siege damage while this zone is the active
    /// perimeter, as a percentage (`120` = 1.2x).
    pub damage_factor_pct: u32,
    /// Starting integrity.
    #[serde(default = "default_integrity")]
    pub integrity: u32,
}

const fn default_integrity() -> u32 {
    MAX_INTEGRITY
}

/// Runtime state of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    /// Which zone this is.
    pub id: ZoneId,
    /// Wall integrity, `0..=100`.
    integrity: u32,
    /// Housing capacity.
    pub capacity: u32,
    /// Percent of the population living here. Zero once lost.
    pub population_share: u32,
    /// Siege damage multiplier while this zone is the active perimeter.
    pub damage_factor: Decimal,
    /// Whether the zone is sealed off. Quarantine slows work homed here.
    pub quarantined: bool,
    /// One-way: once set the zone never comes back.
    lost: bool,
}

impl Zone {
    /// Build a zone from its static definition.
    pub fn from_spec(spec: &ZoneSpec) -> Self {
        let integrity = spec.integrity.min(MAX_INTEGRITY);
        Self {
            id: spec.id,
            integrity,
            capacity: spec.capacity,
            population_share: 0,
            damage_factor: bastion_types::numeric::pct(spec.damage_factor_pct),
            quarantined: false,
            lost: integrity == 0,
        }
    }

    /// Current integrity.
    pub const fn integrity(&self) -> u32 {
        self.integrity
    }

    /// Whether the zone has fallen.
    pub const fn is_lost(&self) -> bool {
        self.lost
    }

    /// Whether the zone still stands.
    pub const fn is_standing(&self) -> bool {
        !self.lost
    }

    /// Subtract `amount` integrity. Returns `true` when this call caused
    /// the zone to fall.
    pub const fn damage(&mut self, amount: u32) -> bool {
        if self.lost {
            return false;
        }
        self.integrity = self.integrity.saturating_sub(amount);
        if self.integrity == 0 {
            self.lost = true;
            self.population_share = 0;
            return true;
        }
        false
    }

    /// Restore up to `points` integrity, capped at [`MAX_INTEGRITY`].
    /// Lost zones cannot be repaired. Returns the integrity actually added.
    pub fn repair(&mut self, points: u32) -> u32 {
        if self.lost {
            return 0;
        }
        let before = self.integrity;
        self.integrity = before.saturating_add(points).min(MAX_INTEGRITY);
        self.integrity.saturating_sub(before)
    }
}
