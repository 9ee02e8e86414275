//! The ordered ring of zones and the active perimeter.
//!
//! Zones are stored outermost first. The first zone still standing is the
//! active perimeter: it alone absorbs siege damage and receives repairs.
//! When it falls the next standing zone takes its place.

use bastion_types::ZoneId;
use serde::Serialize;
use tracing::info;

use crate::WorldError;
use crate::zone::{Zone, ZoneSpec};

/// What a single blow to the perimeter did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Zone that took the damage.
    pub zone: ZoneId,
    /// Integrity removed.
    pub dealt: u32,
    /// Whether the zone fell.
    pub fell: bool,
}

/// The settlement's zones, outermost to innermost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Perimeter {
    zones: Vec<Zone>,
}

impl Perimeter {
    /// Build the perimeter from zone definitions listed outermost first.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyLayout`] for an empty list,
    /// [`WorldError::DuplicateZone`] if a zone appears twice, and
    /// [`WorldError::KeepNotInnermost`] unless the Keep is listed last.
    pub fn from_specs(specs: &[ZoneSpec]) -> Result<Self, WorldError> {
        let Some(last) = specs.last() else {
            return Err(WorldError::EmptyLayout);
        };
        if last.id != ZoneId::Keep {
            return Err(WorldError::KeepNotInnermost);
        }
        let mut zones: Vec<Zone> = Vec::with_capacity(specs.len());
        for spec in specs {
            if zones.iter().any(|zone| zone.id == spec.id) {
                return Err(WorldError::DuplicateZone(spec.id));
            }
            zones.push(Zone::from_spec(spec));
        }
        let mut perimeter = Self { zones };
        perimeter.redistribute_shares();
        Ok(perimeter)
    }

    /// All zones, outermost first.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look up a zone.
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Look up a zone mutably.
    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }

    /// Whether `id` exists and still stands.
    pub fn is_standing(&self, id: ZoneId) -> bool {
        self.zone(id).is_some_and(Zone::is_standing)
    }

    /// The outermost standing zone, if any.
    pub fn active(&self) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.is_standing())
    }

    /// Id of the active perimeter.
    pub fn active_id(&self) -> Option<ZoneId> {
        self.active().map(|zone| zone.id)
    }

    /// Housing capacity of all standing zones.
    pub fn active_capacity(&self) -> u32 {
        self.zones
            .iter()
            .filter(|zone| zone.is_standing())
            .fold(0_u32, |acc, zone| acc.saturating_add(zone.capacity))
    }

    /// Number of zones that have fallen.
    pub fn lost_count(&self) -> u32 {
        let lost = self.zones.iter().filter(|zone| zone.is_lost()).count();
        u32::try_from(lost).unwrap_or(u32::MAX)
    }

    /// Whether the Keep has fallen (or was never defined).
    pub fn keep_breached(&self) -> bool {
        !self.is_standing(ZoneId::Keep)
    }

    /// The innermost standing zone other than the Keep.
    pub fn innermost_standing_outside_keep(&self) -> Option<ZoneId> {
        self.zones
            .iter()
            .rev()
            .find(|zone| zone.id != ZoneId::Keep && zone.is_standing())
            .map(|zone| zone.id)
    }

    /// Mark a standing zone quarantined. Returns `false` if the zone is
    /// missing or lost.
    pub fn quarantine(&mut self, id: ZoneId) -> bool {
        match self.zone_mut(id) {
            Some(zone) if zone.is_standing() => {
                zone.quarantined = true;
                true
            }
            _ => false,
        }
    }

    /// Deal `amount` damage to the active perimeter.
    ///
    /// Returns `None` if every zone has already fallen.
    pub fn damage_active(&mut self, amount: u32) -> Option<DamageOutcome> {
        let id = self.active_id()?;
        self.damage_zone(id, amount)
    }

    /// Deal `amount` damage to a specific zone.
    ///
    /// Returns `None` if the zone is missing or already lost.
    pub fn damage_zone(&mut self, id: ZoneId, amount: u32) -> Option<DamageOutcome> {
        let zone = self.zone_mut(id).filter(|zone| zone.is_standing())?;
        let before = zone.integrity();
        let fell = zone.damage(amount);
        let dealt = before.saturating_sub(zone.integrity());
        if fell {
            info!(zone = %id, "zone lost");
            self.redistribute_shares();
        }
        Some(DamageOutcome { zone: id, dealt, fell })
    }

    /// Heal the active perimeter by up to `points`.
    ///
    /// Returns the zone repaired and the integrity restored.
    pub fn repair_active(&mut self, points: u32) -> Option<(ZoneId, u32)> {
        if points == 0 {
            return None;
        }
        let zone = self.zones.iter_mut().find(|zone| zone.is_standing())?;
        let restored = zone.repair(points);
        Some((zone.id, restored))
    }

    /// Spread population shares over standing zones in proportion to their
    /// capacity. Shares are whole percents summing to 100; rounding
    /// remainders go to the innermost zones first.
    pub fn redistribute_shares(&mut self) {
        let total = self.active_capacity();
        let mut assigned = 0_u32;
        for zone in &mut self.zones {
            zone.population_share = if zone.is_standing() && total > 0 {
                zone.capacity.saturating_mul(100).checked_div(total).unwrap_or(0)
            } else {
                0
            };
            assigned = assigned.saturating_add(zone.population_share);
        }
        let mut remainder = 100_u32.saturating_sub(assigned);
        if total == 0 {
            return;
        }
        for zone in self.zones.iter_mut().rev() {
            if remainder == 0 {
                break;
            }
            if zone.is_standing() {
                zone.population_share = zone.population_share.saturating_add(1);
                remainder = remainder.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spec(id: ZoneId, capacity: u32) -> ZoneSpec {
        ZoneSpec {
            id,
            capacity,
            damage_factor_pct: 100,
            integrity: 100,
        }
    }

    fn ring() -> Perimeter {
        Perimeter::from_specs(&[
            spec(ZoneId::OuterFarms, 30),
            spec(ZoneId::ArtisanQuarter, 25),
            spec(ZoneId::LowerWard, 25),
            spec(ZoneId::UpperWard, 20),
            spec(ZoneId::Keep, 15),
        ])
        .unwrap()
    }

    #[test]
    fn keep_must_be_innermost() {
        let err = Perimeter::from_specs(&[spec(ZoneId::Keep, 15), spec(ZoneId::LowerWard, 25)]);
        assert!(matches!(err, Err(WorldError::KeepNotInnermost)));
        assert!(matches!(
            Perimeter::from_specs(&[]),
            Err(WorldError::EmptyLayout)
        ));
    }

    #[test]
    fn duplicate_zones_are_rejected() {
        let err = Perimeter::from_specs(&[spec(ZoneId::Keep, 15), spec(ZoneId::Keep, 15)]);
        assert!(matches!(err, Err(WorldError::DuplicateZone(ZoneId::Keep))));
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let perimeter = ring();
        let total: u32 = perimeter.zones().iter().map(|z| z.population_share).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn active_perimeter_moves_inward_when_zone_falls() {
        let mut perimeter = ring();
        assert_eq!(perimeter.active_id(), Some(ZoneId::OuterFarms));
        let outcome = perimeter.damage_active(150).unwrap();
        assert!(outcome.fell);
        assert_eq!(outcome.dealt, 100);
        assert_eq!(perimeter.active_id(), Some(ZoneId::ArtisanQuarter));
        assert_eq!(perimeter.lost_count(), 1);
        assert_eq!(perimeter.active_capacity(), 85);

        let total: u32 = perimeter.zones().iter().map(|z| z.population_share).sum();
        assert_eq!(total, 100);
        assert_eq!(perimeter.zone(ZoneId::OuterFarms).unwrap().population_share, 0);
    }

    #[test]
    fn repairs_target_the_new_active_zone() {
        let mut perimeter = ring();
        perimeter.damage_zone(ZoneId::ArtisanQuarter, 30);
        perimeter.damage_active(100);
        let (zone, restored) = perimeter.repair_active(50).unwrap();
        assert_eq!(zone, ZoneId::ArtisanQuarter);
        assert_eq!(restored, 30);
        assert!(perimeter.zone(ZoneId::OuterFarms).unwrap().is_lost());
    }

    #[test]
    fn quarantine_only_applies_to_standing_zones() {
        let mut perimeter = ring();
        assert!(perimeter.quarantine(ZoneId::UpperWard));
        perimeter.damage_zone(ZoneId::OuterFarms, 100);
        assert!(!perimeter.quarantine(ZoneId::OuterFarms));
        assert_eq!(
            perimeter.innermost_standing_outside_keep(),
            Some(ZoneId::UpperWard)
        );
    }

    #[test]
    fn keep_breach_is_detected() {
        let mut perimeter = ring();
        assert!(!perimeter.keep_breached());
        perimeter.damage_zone(ZoneId::Keep, 100);
        assert!(perimeter.keep_breached());
    }
}
