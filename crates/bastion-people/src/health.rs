//! Sickness formulas.
//!
//! Pure functions over the current numbers. The engine decides the order
//! they run in and applies the results to the population and stats.

use bastion_types::numeric::div_ceil;

use crate::config::HealthConfig;

/// Daily change in city-wide sickness.
///
/// The two unrest tiers replace each other rather than stacking.
pub fn sickness_drift(config: &HealthConfig, unrest: u32, fuel_empty: bool, plague: bool) -> i32 {
    let mut drift = config.baseline_drift;
    if unrest >= config.unrest_tier_two {
        drift = drift.saturating_add(config.unrest_tier_two_drift);
    } else if unrest >= config.unrest_tier_one {
        drift = drift.saturating_add(config.unrest_tier_one_drift);
    }
    if fuel_empty {
        drift = drift.saturating_add(config.zero_fuel_drift);
    }
    if plague {
        drift = drift.saturating_add(config.plague_drift);
    }
    drift
}

/// Healthy workers who fall sick today.
///
/// `floor(available x (sickness + weight x deficits) / divisor)`
pub fn new_cases(config: &HealthConfig, available: u32, sickness: u32, deficits: u32) -> u32 {
    let pressure = u64::from(sickness)
        .saturating_add(u64::from(config.deficit_case_weight).saturating_mul(u64::from(deficits)));
    let cases = u64::from(available)
        .saturating_mul(pressure)
        .checked_div(u64::from(config.case_divisor))
        .unwrap_or(0);
    u32::try_from(cases).unwrap_or(u32::MAX).min(available)
}

/// Days a cohort falling sick today stays in the queue.
pub fn cohort_duration(config: &HealthConfig, sickness: u32) -> u32 {
    let extra = sickness.checked_div(config.duration_divisor).unwrap_or(0);
    config.base_duration.saturating_add(extra)
}

/// Whether sickness is too high for anyone to recover.
pub const fn recovery_blocked(config: &HealthConfig, sickness: u32) -> bool {
    sickness >= config.recovery_threshold
}

/// Recoveries possible today: the least of the ready sick, clinic
/// capacity, and what the medicine stock can treat.
pub fn recovery_allowance(config: &HealthConfig, ready: u32, clinic_capacity: u32, medicine: u32) -> u32 {
    let treatable = medicine
        .checked_div(config.medicine_per_recovery)
        .unwrap_or(u32::MAX);
    ready.min(clinic_capacity).min(treatable)
}

/// Medicine consumed by `recovered` recoveries.
pub const fn medicine_for(config: &HealthConfig, recovered: u32) -> u32 {
    recovered.saturating_mul(config.medicine_per_recovery)
}

/// Sick people who die of severe sickness today.
pub const fn severe_deaths(config: &HealthConfig, sickness: u32, sick: u32) -> u32 {
    if sickness < config.severe_threshold {
        return 0;
    }
    div_ceil(sick, config.severe_death_divisor)
}
