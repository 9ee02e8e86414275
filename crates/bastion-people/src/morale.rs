//! Daily unrest and morale drift.

use crate::config::MoraleConfig;

/// The numbers drift depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftInputs {
    /// Current morale.
    pub morale: u32,
    /// Current unrest.
    pub unrest: u32,
    /// Current sickness.
    pub sickness: u32,
    /// Guards on the walls.
    pub guards_at_home: u32,
    /// Zones already lost.
    pub lost_zones: u32,
    /// Whether today passed without any deficit.
    pub deficit_free: bool,
}

/// Signed stat changes produced by drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drift {
    /// Change to unrest.
    pub unrest: i32,
    /// Change to morale.
    pub morale: i32,
}

/// Compute today's drift.
pub fn drift(config: &MoraleConfig, inputs: &DriftInputs) -> Drift {
    let mut unrest: i32 = 0;
    if inputs.morale < config.very_low_morale {
        unrest = unrest.saturating_add(2);
    } else if inputs.morale < config.low_morale {
        unrest = unrest.saturating_add(1);
    }
    if inputs.sickness >= config.sickness_strain {
        unrest = unrest.saturating_add(1);
    }
    unrest = unrest.saturating_add(signed(inputs.lost_zones));
    let calm = inputs
        .guards_at_home
        .checked_div(config.guards_per_calm)
        .unwrap_or(0)
        .min(config.max_guard_calm);
    unrest = unrest.saturating_sub(signed(calm));
    if inputs.morale >= config.high_morale {
        unrest = unrest.saturating_sub(1);
    }

    let mut morale: i32 = 0;
    if inputs.unrest >= config.unrest_strain {
        morale = morale.saturating_sub(1);
    }
    if inputs.sickness >= config.sickness_strain {
        morale = morale.saturating_sub(1);
    }
    let despair = inputs
        .lost_zones
        .checked_div(config.lost_zone_divisor)
        .unwrap_or(0);
    morale = morale.saturating_sub(signed(despair));
    if inputs.deficit_free {
        morale = morale.saturating_add(signed(config.deficit_free_bonus));
    }

    Drift { unrest, morale }
}

fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_day() -> DriftInputs {
        DriftInputs {
            morale: 60,
            unrest: 15,
            sickness: 10,
            guards_at_home: 15,
            lost_zones: 0,
            deficit_free: true,
        }
    }

    #[test]
    fn guarded_content_city_calms() {
        let result = drift(&MoraleConfig::default(), &calm_day());
        assert_eq!(result, Drift { unrest: -1, morale: 1 });
    }

    #[test]
    fn despair_compounds() {
        let inputs = DriftInputs {
            morale: 10,
            unrest: 70,
            sickness: 55,
            guards_at_home: 0,
            lost_zones: 3,
            deficit_free: false,
        };
        let result = drift(&MoraleConfig::default(), &inputs);
        // unrest: +2 very low morale, +1 sickness, +3 lost zones
        // morale: -1 unrest, -1 sickness, -1 lost zones
        assert_eq!(result, Drift { unrest: 6, morale: -3 });
    }

    #[test]
    fn guard_calm_is_capped() {
        let inputs = DriftInputs {
            guards_at_home: 200,
            morale: 50,
            ..calm_day()
        };
        let result = drift(&MoraleConfig::default(), &inputs);
        assert_eq!(result.unrest, -3);
    }
}
