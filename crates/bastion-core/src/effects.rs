//! The Daily Effects Accumulator.
//!
//! Laws, orders, weather, and disruptions fold their multipliers in here
//! during the morning stages; production, consumption, and the siege read
//! them once; the whole thing is reset at the start of the next day.
//! Multipliers compose by multiplication, so the order contributions arrive
//! in only matters for rounding at the point of use.

use std::collections::BTreeMap;

use bastion_types::numeric::compound;
use bastion_types::{JobKind, ResourceKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// Per-day scratch multipliers and bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEffects {
    production: Decimal,
    jobs: BTreeMap<JobKind, Decimal>,
    needs: BTreeMap<ResourceKind, Decimal>,
    siege_damage: Decimal,
    clinic_bonus: u32,
}

impl Default for DailyEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyEffects {
    /// Neutral effects: every multiplier one, no bonuses.
    pub const fn new() -> Self {
        Self {
            production: Decimal::ONE,
            jobs: BTreeMap::new(),
            needs: BTreeMap::new(),
            siege_damage: Decimal::ONE,
            clinic_bonus: 0,
        }
    }

    /// Return to neutral.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Scale output of every job.
    pub fn scale_production(&mut self, multiplier: Decimal) {
        self.production = compound(self.production, multiplier);
    }

    /// Scale output of one job.
    pub fn scale_job(&mut self, job: JobKind, multiplier: Decimal) {
        let slot = self.jobs.entry(job).or_insert(Decimal::ONE);
        *slot = compound(*slot, multiplier);
    }

    /// Scale the population's need for one resource.
    pub fn scale_need(&mut self, resource: ResourceKind, multiplier: Decimal) {
        let slot = self.needs.entry(resource).or_insert(Decimal::ONE);
        *slot = compound(*slot, multiplier);
    }

    /// Scale today's siege damage.
    pub fn scale_siege(&mut self, multiplier: Decimal) {
        self.siege_damage = compound(self.siege_damage, multiplier);
    }

    /// Add flat clinic capacity.
    pub const fn add_clinic_capacity(&mut self, amount: u32) {
        self.clinic_bonus = self.clinic_bonus.saturating_add(amount);
    }

    /// Global production multiplier.
    pub const fn production(&self) -> Decimal {
        self.production
    }

    /// Combined global and job-specific multiplier for `job`.
    pub fn job_multiplier(&self, job: JobKind) -> Decimal {
        let specific = self.jobs.get(&job).copied().unwrap_or(Decimal::ONE);
        compound(self.production, specific)
    }

    /// Need multiplier for `resource`.
    pub fn need_multiplier(&self, resource: ResourceKind) -> Decimal {
        self.needs.get(&resource).copied().unwrap_or(Decimal::ONE)
    }

    /// Siege damage multiplier.
    pub const fn siege_multiplier(&self) -> Decimal {
        self.siege_damage
    }

    /// Flat clinic capacity bonus.
    pub const fn clinic_bonus(&self) -> u32 {
        self.clinic_bonus
    }
}
