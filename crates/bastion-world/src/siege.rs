//! The besieging army: intensity, escalation, and daily wall damage.
//!
//! Intensity rises on a fixed schedule or early when enough pressure flags
//! hold at once. A positive escalation delay (bought by sorties, sabotage,
//! and diplomacy) absorbs one escalation per point instead.
//!
//! Daily damage to the active perimeter:
//!
//! ```text
//! ceil((base + intensity) x zone factor x siege multiplier x final assault x weather)
//! ```

use bastion_types::numeric::{ceil_u32, compound, pct, scale};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::SiegeConfig;

/// Conditions that push the enemy to escalate early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiegePressure {
    /// Unrest at or above the pressure level.
    pub restless: bool,
    /// Sickness at or above the pressure level.
    pub ailing: bool,
    /// Food ran short today.
    pub food_deficit: bool,
    /// Water ran short today.
    pub water_deficit: bool,
    /// Enough zones have fallen.
    pub crumbling: bool,
}

impl SiegePressure {
    /// Number of flags raised.
    pub fn count(&self) -> u32 {
        [
            self.restless,
            self.ailing,
            self.food_deficit,
            self.water_deficit,
            self.crumbling,
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }
}

/// What happened to the siege's intensity today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Nothing changed.
    Holding,
    /// Intensity rose.
    Escalated {
        /// Intensity after the rise.
        intensity: u32,
        /// Whether pressure forced the rise ahead of schedule.
        forced: bool,
    },
    /// An escalation was due but a delay point absorbed it.
    Delayed {
        /// Delay points left.
        remaining: u32,
    },
}

/// Runtime state of the siege.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiegeState {
    /// Current intensity.
    pub intensity: u32,
    /// Escalations still to be absorbed.
    pub escalation_delay: u32,
    /// Days since the last escalation (or absorbed escalation).
    pub days_since_escalation: u32,
    /// Whether the final assault has begun.
    pub final_assault: bool,
}

impl SiegeState {
    /// Start a siege at the configured intensity.
    pub const fn new(config: &SiegeConfig) -> Self {
        Self {
            intensity: config.starting_intensity,
            escalation_delay: 0,
            days_since_escalation: 0,
            final_assault: false,
        }
    }

    /// Buy `days` more escalation delay.
    pub const fn add_delay(&mut self, days: u32) {
        self.escalation_delay = self.escalation_delay.saturating_add(days);
    }

    /// Advance the siege clock for `day` of a run ending on `target_day`.
    pub fn advance(
        &mut self,
        config: &SiegeConfig,
        day: u32,
        target_day: u32,
        pressure: SiegePressure,
    ) -> Escalation {
        self.days_since_escalation = self.days_since_escalation.saturating_add(1);
        self.final_assault = day.saturating_add(config.final_assault_days) > target_day;

        let scheduled = self.days_since_escalation >= config.escalation_interval_days;
        let forced = pressure.count() >= config.pressure_threshold;
        if !scheduled && !forced {
            return Escalation::Holding;
        }

        self.days_since_escalation = 0;
        if self.escalation_delay > 0 {
            self.escalation_delay = self.escalation_delay.saturating_sub(1);
            debug!(day, remaining = self.escalation_delay, "escalation delayed");
            return Escalation::Delayed {
                remaining: self.escalation_delay,
            };
        }

        self.intensity = self.intensity.saturating_add(1);
        debug!(day, intensity = self.intensity, forced = !scheduled, "siege escalated");
        Escalation::Escalated {
            intensity: self.intensity,
            forced: !scheduled,
        }
    }

    /// Damage dealt today to a zone with `zone_factor`.
    pub fn damage(
        &self,
        config: &SiegeConfig,
        zone_factor: Decimal,
        siege_multiplier: Decimal,
        weather_multiplier: Decimal,
    ) -> u32 {
        let base = config.base_damage.saturating_add(self.intensity);
        let assault = if self.final_assault {
            pct(config.final_assault_pct)
        } else {
            Decimal::ONE
        };
        let multiplier = compound(
            compound(compound(zone_factor, siege_multiplier), assault),
            weather_multiplier,
        );
        ceil_u32(scale(base, multiplier))
    }
}

/// Damage multiplier granted by `level` points of fortification. Never
/// negative.
pub fn fortification_multiplier(config: &SiegeConfig, level: u32) -> Decimal {
    let reduction = config.fortification_reduction_pct.saturating_mul(level);
    pct(100_u32.saturating_sub(reduction))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn pressure(count: u32) -> SiegePressure {
        SiegePressure {
            restless: count >= 1,
            ailing: count >= 2,
            food_deficit: count >= 3,
            water_deficit: count >= 4,
            crumbling: count >= 5,
        }
    }

    #[test]
    fn escalates_on_schedule() {
        let config = SiegeConfig::default();
        let mut siege = SiegeState::new(&config);
        for day in 1..7 {
            assert_eq!(siege.advance(&config, day, 40, pressure(0)), Escalation::Holding);
        }
        assert_eq!(
            siege.advance(&config, 7, 40, pressure(0)),
            Escalation::Escalated {
                intensity: 2,
                forced: false
            }
        );
        assert_eq!(siege.days_since_escalation, 0);
    }

    #[test]
    fn pressure_majority_forces_escalation() {
        let config = SiegeConfig::default();
        let mut siege = SiegeState::new(&config);
        assert_eq!(siege.advance(&config, 1, 40, pressure(2)), Escalation::Holding);
        assert_eq!(
            siege.advance(&config, 2, 40, pressure(3)),
            Escalation::Escalated {
                intensity: 2,
                forced: true
            }
        );
    }

    #[test]
    fn delay_absorbs_escalation() {
        let config = SiegeConfig::default();
        let mut siege = SiegeState::new(&config);
        siege.add_delay(1);
        assert_eq!(
            siege.advance(&config, 1, 40, pressure(5)),
            Escalation::Delayed { remaining: 0 }
        );
        assert_eq!(siege.intensity, 1);
    }

    #[test]
    fn final_assault_covers_last_days() {
        let config = SiegeConfig::default();
        let mut siege = SiegeState::new(&config);
        siege.advance(&config, 35, 40, pressure(0));
        assert!(!siege.final_assault);
        siege.advance(&config, 36, 40, pressure(0));
        assert!(siege.final_assault);
    }

    #[test]
    fn damage_rounds_up() {
        let config = SiegeConfig::default();
        let siege = SiegeState::new(&config);
        // (4 + 1) x 1.2 = 6
        assert_eq!(siege.damage(&config, dec!(1.2), Decimal::ONE, Decimal::ONE), 6);
        // (4 + 1) x 0.9 x 0.9 = 4.05 -> 5
        assert_eq!(siege.damage(&config, dec!(0.9), Decimal::ONE, dec!(0.9)), 5);
    }

    #[test]
    fn final_assault_multiplies_damage() {
        let config = SiegeConfig::default();
        let mut siege = SiegeState::new(&config);
        siege.final_assault = true;
        // (4 + 1) x 1.5 = 7.5 -> 8
        assert_eq!(siege.damage(&config, Decimal::ONE, Decimal::ONE, Decimal::ONE), 8);
    }

    #[test]
    fn fortification_never_goes_negative() {
        let config = SiegeConfig::default();
        assert_eq!(fortification_multiplier(&config, 2), dec!(0.90));
        assert_eq!(fortification_multiplier(&config, 40), Decimal::ZERO);
    }
}
