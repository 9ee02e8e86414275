//! Job definitions, the daily worker allocation, and production math.
//!
//! | Job | Output / worker | Inputs / worker | Home zone |
//! |-----|-----------------|-----------------|-----------|
//! | Farming | 3 food | 1 water | Outer Farms |
//! | Water Drawing | 4 water | none | Lower Ward |
//! | Fuel Gathering | 2 fuel | none | Artisan Quarter |
//! | Apothecary | 1 medicine | 1 fuel, 1 water | Upper Ward |
//! | Salvage | 2 materials | none | Artisan Quarter |
//! | Repair | 2 repair points | 1 materials | Keep |
//! | Clinic | 2 recoveries of capacity | none | Upper Ward |
//!
//! Production degrades gracefully when inputs run short: the scarcest
//! input sets a scale factor in `[0, 1]` that shrinks both output and the
//! inputs spent.

use std::collections::BTreeMap;

use bastion_types::numeric::{ceil_u32, floor_u32, pct, ratio, scale};
use bastion_types::{JobKind, ResourceKind, ZoneId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PeopleError;

// ---------------------------------------------------------------------------
// Job definitions
// ---------------------------------------------------------------------------

/// What a job yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutput {
    /// Units of a resource, credited to the ledger.
    Resource(ResourceKind),
    /// Repair points, applied to the perimeter after siege damage.
    RepairPoints,
    /// Clinic capacity, consumed by recovery.
    Care,
}

/// Static definition of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Which job.
    pub job: JobKind,
    /// What the job yields.
    pub output: JobOutput,
    /// Units yielded per worker before multipliers.
    pub output_per_worker: u32,
    /// Resources each worker consumes.
    #[serde(default)]
    pub inputs: Vec<(ResourceKind, u32)>,
    /// Zone whose loss or quarantine slows this job.
    pub home_zone: ZoneId,
}

/// The standard job table, in production order.
pub fn default_jobs() -> Vec<JobSpec> {
    vec![
        JobSpec {
            job: JobKind::Farming,
            output: JobOutput::Resource(ResourceKind::Food),
            output_per_worker: 3,
            inputs: vec![(ResourceKind::Water, 1)],
            home_zone: ZoneId::OuterFarms,
        },
        JobSpec {
            job: JobKind::WaterDrawing,
            output: JobOutput::Resource(ResourceKind::Water),
            output_per_worker: 4,
            inputs: Vec::new(),
            home_zone: ZoneId::LowerWard,
        },
        JobSpec {
            job: JobKind::FuelGathering,
            output: JobOutput::Resource(ResourceKind::Fuel),
            output_per_worker: 2,
            inputs: Vec::new(),
            home_zone: ZoneId::ArtisanQuarter,
        },
        JobSpec {
            job: JobKind::Apothecary,
            output: JobOutput::Resource(ResourceKind::Medicine),
            output_per_worker: 1,
            inputs: vec![(ResourceKind::Fuel, 1), (ResourceKind::Water, 1)],
            home_zone: ZoneId::UpperWard,
        },
        JobSpec {
            job: JobKind::Salvage,
            output: JobOutput::Resource(ResourceKind::Materials),
            output_per_worker: 2,
            inputs: Vec::new(),
            home_zone: ZoneId::ArtisanQuarter,
        },
        JobSpec {
            job: JobKind::Repair,
            output: JobOutput::RepairPoints,
            output_per_worker: 2,
            inputs: vec![(ResourceKind::Materials, 1)],
            home_zone: ZoneId::Keep,
        },
        JobSpec {
            job: JobKind::Clinic,
            output: JobOutput::Care,
            output_per_worker: 2,
            inputs: Vec::new(),
            home_zone: ZoneId::UpperWard,
        },
    ]
}

/// Output penalties for jobs whose home zone is lost or quarantined.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ZonePenalty {
    /// Multiplier when the home zone is lost (default: 30%).
    pub lost_pct: u32,
    /// Multiplier when the home zone is quarantined (default: 75%).
    pub quarantined_pct: u32,
    /// Multiplier when both apply (default: 20%).
    pub both_pct: u32,
}

impl Default for ZonePenalty {
    fn default() -> Self {
        Self {
            lost_pct: 30,
            quarantined_pct: 75,
            both_pct: 20,
        }
    }
}

impl ZonePenalty {
    /// Multiplier for a home zone in the given condition.
    pub fn multiplier(&self, lost: bool, quarantined: bool) -> Decimal {
        match (lost, quarantined) {
            (true, true) => pct(self.both_pct),
            (true, false) => pct(self.lost_pct),
            (false, true) => pct(self.quarantined_pct),
            (false, false) => Decimal::ONE,
        }
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Workers assigned to each job for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAllocation {
    assigned: BTreeMap<JobKind, u32>,
}

impl JobAllocation {
    /// An allocation with nobody assigned.
    pub const fn new() -> Self {
        Self {
            assigned: BTreeMap::new(),
        }
    }

    /// Workers on `job`.
    pub fn get(&self, job: JobKind) -> u32 {
        self.assigned.get(&job).copied().unwrap_or(0)
    }

    /// Set the workers on `job`.
    pub fn set(&mut self, job: JobKind, workers: u32) {
        if workers == 0 {
            self.assigned.remove(&job);
        } else {
            self.assigned.insert(job, workers);
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, job: JobKind, workers: u32) -> Self {
        self.set(job, workers);
        self
    }

    /// Workers across all jobs.
    pub fn total(&self) -> u32 {
        self.assigned
            .values()
            .fold(0_u32, |acc, count| acc.saturating_add(*count))
    }

    /// Iterate `(job, workers)` for staffed jobs in production order.
    pub fn iter(&self) -> impl Iterator<Item = (JobKind, u32)> + '_ {
        self.assigned.iter().map(|(job, count)| (*job, *count))
    }

    /// Check the allocation against the available workforce.
    ///
    /// `step` of 0 or 1 disables quantization.
    ///
    /// # Errors
    ///
    /// [`PeopleError::AllocationOverflow`] when the total exceeds
    /// `available`, [`PeopleError::OffStep`] when a count is not a
    /// multiple of `step`.
    pub fn validate(&self, available: u32, step: u32) -> Result<(), PeopleError> {
        let assigned = self.total();
        if assigned > available {
            return Err(PeopleError::AllocationOverflow {
                assigned,
                available,
            });
        }
        if step > 1 {
            for (job, count) in self.iter() {
                if count.checked_rem(step).unwrap_or(0) != 0 {
                    return Err(PeopleError::OffStep { job, count, step });
                }
            }
        }
        Ok(())
    }

    /// Remove workers until the total fits `ceiling`, taking from the
    /// last job in production order first. Returns how many were removed.
    pub fn shrink_to(&mut self, ceiling: u32) -> u32 {
        let mut excess = self.total().saturating_sub(ceiling);
        let removed = excess;
        for job in JobKind::ALL.iter().rev() {
            if excess == 0 {
                break;
            }
            let current = self.get(*job);
            let cut = current.min(excess);
            self.set(*job, current.saturating_sub(cut));
            excess = excess.saturating_sub(cut);
        }
        if removed > 0 {
            debug!(removed, ceiling, "allocation shrunk to fit the workforce");
        }
        removed
    }
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// The result of running one job for a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionPlan {
    /// Units yielded after scaling and flooring.
    pub output: u32,
    /// Inputs to debit.
    pub inputs_spent: Vec<(ResourceKind, u32)>,
    /// Input scarcity factor in `[0, 1]`.
    pub scale: Decimal,
}

/// Work out what `workers` on `spec` produce today.
///
/// `multiplier` is the product of every global, job, zone, and
/// disruption multiplier. `stock` reports the current amount on hand.
pub fn plan_production(
    spec: &JobSpec,
    workers: u32,
    multiplier: Decimal,
    stock: impl Fn(ResourceKind) -> u32,
) -> ProductionPlan {
    let needs: Vec<(ResourceKind, u32)> = spec
        .inputs
        .iter()
        .map(|(kind, per_worker)| (*kind, per_worker.saturating_mul(workers)))
        .filter(|(_, needed)| *needed > 0)
        .collect();

    let input_scale = needs
        .iter()
        .map(|(kind, needed)| ratio(stock(*kind), *needed).min(Decimal::ONE))
        .min()
        .unwrap_or(Decimal::ONE)
        .max(Decimal::ZERO);

    let nominal = scale(workers.saturating_mul(spec.output_per_worker), multiplier);
    let output = floor_u32(nominal.checked_mul(input_scale).unwrap_or(Decimal::ZERO));

    let inputs_spent = needs
        .iter()
        .map(|(kind, needed)| {
            let spent = ceil_u32(scale(*needed, input_scale)).min(stock(*kind));
            (*kind, spent)
        })
        .filter(|(_, spent)| *spent > 0)
        .collect();

    ProductionPlan {
        output,
        inputs_spent,
        scale: input_scale,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn spec(job: JobKind) -> JobSpec {
        default_jobs().into_iter().find(|s| s.job == job).unwrap()
    }

    #[test]
    fn default_jobs_follow_production_order() {
        let order: Vec<JobKind> = default_jobs().iter().map(|s| s.job).collect();
        assert_eq!(order, JobKind::ALL.to_vec());
    }

    #[test]
    fn validate_rejects_overflow() {
        let alloc = JobAllocation::new()
            .with(JobKind::Farming, 40)
            .with(JobKind::Repair, 20);
        assert_eq!(
            alloc.validate(50, 1),
            Err(PeopleError::AllocationOverflow {
                assigned: 60,
                available: 50
            })
        );
        assert!(alloc.validate(60, 1).is_ok());
    }

    #[test]
    fn validate_enforces_step() {
        let alloc = JobAllocation::new().with(JobKind::Salvage, 7);
        assert!(matches!(
            alloc.validate(100, 5),
            Err(PeopleError::OffStep { count: 7, step: 5, .. })
        ));
        assert!(alloc.validate(100, 0).is_ok());
    }

    #[test]
    fn shrink_takes_from_last_job_first() {
        let mut alloc = JobAllocation::new()
            .with(JobKind::Farming, 10)
            .with(JobKind::Repair, 4)
            .with(JobKind::Clinic, 3);
        assert_eq!(alloc.shrink_to(11), 6);
        assert_eq!(alloc.get(JobKind::Clinic), 0);
        assert_eq!(alloc.get(JobKind::Repair), 1);
        assert_eq!(alloc.get(JobKind::Farming), 10);
        assert_eq!(alloc.total(), 11);
    }

    #[test]
    fn zero_workers_are_not_stored() {
        let alloc = JobAllocation::new().with(JobKind::Farming, 0);
        assert_eq!(alloc.iter().count(), 0);
    }

    #[test]
    fn full_inputs_give_full_output() {
        let plan = plan_production(&spec(JobKind::Farming), 10, Decimal::ONE, |_| 100);
        assert_eq!(plan.output, 30);
        assert_eq!(plan.inputs_spent, vec![(ResourceKind::Water, 10)]);
        assert_eq!(plan.scale, Decimal::ONE);
    }

    #[test]
    fn scarce_input_scales_output_and_spend() {
        // Apothecary: 4 workers need 4 fuel and 4 water; only 1 fuel.
        let plan = plan_production(&spec(JobKind::Apothecary), 4, Decimal::ONE, |kind| {
            if kind == ResourceKind::Fuel { 1 } else { 50 }
        });
        assert_eq!(plan.scale, dec!(0.25));
        assert_eq!(plan.output, 1);
        assert_eq!(
            plan.inputs_spent,
            vec![(ResourceKind::Fuel, 1), (ResourceKind::Water, 1)]
        );
    }

    #[test]
    fn no_input_stock_means_no_output() {
        let plan = plan_production(&spec(JobKind::Repair), 5, Decimal::ONE, |_| 0);
        assert_eq!(plan.output, 0);
        assert!(plan.inputs_spent.is_empty());
    }

    #[test]
    fn multiplier_output_is_floored() {
        // 3 workers x 2 fuel x 0.5 = 3
        let plan = plan_production(&spec(JobKind::FuelGathering), 3, dec!(0.5), |_| 0);
        assert_eq!(plan.output, 3);
        // 3 workers x 3 food x 0.7 = 6.3 -> 6
        let plan = plan_production(&spec(JobKind::Farming), 3, dec!(0.7), |_| 100);
        assert_eq!(plan.output, 6);
    }

    #[test]
    fn zone_penalty_cases() {
        let penalty = ZonePenalty::default();
        assert_eq!(penalty.multiplier(false, false), Decimal::ONE);
        assert_eq!(penalty.multiplier(true, false), dec!(0.30));
        assert_eq!(penalty.multiplier(false, true), dec!(0.75));
        assert_eq!(penalty.multiplier(true, true), dec!(0.20));
    }
}
