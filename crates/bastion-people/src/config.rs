//! Configuration for sickness, recovery, and morale mechanics.
//!
//! These values mirror the `health` and `morale` sections of
//! `bastion-config.yaml`. Each struct bundles every tunable so callers
//! (the engine, tests) can override defaults.

use serde::Deserialize;

/// Sickness drift, new cases, recovery, and severe-sickness deaths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Daily sickness change with nothing else going on (default: -1).
    pub baseline_drift: i32,
    /// Unrest at which sickness starts to climb (default: 50).
    pub unrest_tier_one: u32,
    /// Sickness added at the first unrest tier (default: 1).
    pub unrest_tier_one_drift: i32,
    /// Unrest at which sickness climbs faster (default: 75).
    pub unrest_tier_two: u32,
    /// Sickness added at the second unrest tier, replacing the first (default: 2).
    pub unrest_tier_two_drift: i32,
    /// Sickness added on a day with no fuel left (default: 3).
    pub zero_fuel_drift: i32,
    /// Sickness added while a plague rages (default: 4).
    pub plague_drift: i32,
    /// Sickness-equivalent weight of each deficit when rolling new cases (default: 5).
    pub deficit_case_weight: u32,
    /// Divisor of the new-case formula (default: 400).
    pub case_divisor: u32,
    /// Minimum days a new cohort stays sick (default: 3).
    pub base_duration: u32,
    /// Sickness points per extra day of illness (default: 20).
    pub duration_divisor: u32,
    /// Sickness at or above which nobody recovers (default: 70).
    pub recovery_threshold: u32,
    /// Whether recovery countdowns run at all (default: true).
    pub recovery_enabled: bool,
    /// Medicine consumed per recovery (default: 1).
    pub medicine_per_recovery: u32,
    /// Sickness at or above which the sick begin to die (default: 85).
    pub severe_threshold: u32,
    /// One in this many sick die per severe day, rounded up (default: 10).
    pub severe_death_divisor: u32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            baseline_drift: -1,
            unrest_tier_one: 50,
            unrest_tier_one_drift: 1,
            unrest_tier_two: 75,
            unrest_tier_two_drift: 2,
            zero_fuel_drift: 3,
            plague_drift: 4,
            deficit_case_weight: 5,
            case_divisor: 400,
            base_duration: 3,
            duration_divisor: 20,
            recovery_threshold: 70,
            recovery_enabled: true,
            medicine_per_recovery: 1,
            severe_threshold: 85,
            severe_death_divisor: 10,
        }
    }
}

/// Daily unrest and morale drift.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    /// Morale below which unrest rises by one (default: 40).
    pub low_morale: u32,
    /// Morale below which unrest rises by two instead (default: 20).
    pub very_low_morale: u32,
    /// Sickness at or above which unrest rises and morale falls (default: 50).
    pub sickness_strain: u32,
    /// Guards at home per point of unrest suppressed (default: 10).
    pub guards_per_calm: u32,
    /// Most unrest guards can suppress in a day (default: 3).
    pub max_guard_calm: u32,
    /// Morale at or above which unrest eases by one (default: 70).
    pub high_morale: u32,
    /// Unrest at or above which morale falls by one (default: 60).
    pub unrest_strain: u32,
    /// Lost zones per point of morale lost (default: 2).
    pub lost_zone_divisor: u32,
    /// Morale gained on a day without any deficit (default: 1).
    pub deficit_free_bonus: u32,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            low_morale: 40,
            very_low_morale: 20,
            sickness_strain: 50,
            guards_per_calm: 10,
            max_guard_calm: 3,
            high_morale: 70,
            unrest_strain: 60,
            lost_zone_divisor: 2,
            deficit_free_bonus: 1,
        }
    }
}
