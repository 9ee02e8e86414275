//! Default zone layout: five districts from the outer fields to the Keep.
//!
//! | Zone | Capacity | Damage factor |
//! |------|----------|---------------|
//! | Outer Farms | 30 | 1.2 |
//! | Artisan Quarter | 25 | 1.0 |
//! | Lower Ward | 25 | 1.0 |
//! | Upper Ward | 20 | 0.9 |
//! | Keep | 15 | 0.8 |

use bastion_types::ZoneId;

use crate::zone::{MAX_INTEGRITY, ZoneSpec};

/// The standard settlement layout, outermost first.
pub fn default_zones() -> Vec<ZoneSpec> {
    [
        (ZoneId::OuterFarms, 30, 120),
        (ZoneId::ArtisanQuarter, 25, 100),
        (ZoneId::LowerWard, 25, 100),
        (ZoneId::UpperWard, 20, 90),
        (ZoneId::Keep, 15, 80),
    ]
    .into_iter()
    .map(|(id, capacity, damage_factor_pct)| ZoneSpec {
        id,
        capacity,
        damage_factor_pct,
        integrity: MAX_INTEGRITY,
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Perimeter;

    #[test]
    fn default_layout_builds() {
        let perimeter = Perimeter::from_specs(&default_zones()).unwrap();
        assert_eq!(perimeter.zones().len(), 5);
        assert_eq!(perimeter.active_capacity(), 115);
        assert_eq!(perimeter.active_id(), Some(ZoneId::OuterFarms));
    }
}
