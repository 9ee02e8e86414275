//! Stages 4 to 6: production, consumption, and shortfall penalties.

use bastion_people::{JobOutput, plan_production};
use bastion_types::numeric::{ceil_u32, compound, div_ceil, pct, scale};
use bastion_types::{ConsumptionLine, DayResolutionReport, JobKind, LogTag, ResourceKind, StatKind};
use tracing::debug;

use super::{Engine, signed};
use crate::state::GameState;

impl Engine {
    /// Stage 4: every staffed job produces, in job order.
    pub(super) fn compute_production(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let penalty = &self.config.economy.zone_penalty;

        for job in JobKind::ALL {
            let workers = state.jobs.get(job);
            if workers == 0 {
                continue;
            }
            let Some(spec) = self.config.job(job) else {
                continue;
            };

            // A zone missing from the layout counts as lost.
            let zone_multiplier = state.perimeter.zone(spec.home_zone).map_or_else(
                || penalty.multiplier(true, false),
                |zone| penalty.multiplier(zone.is_lost(), zone.quarantined),
            );
            let multiplier = compound(state.effects.job_multiplier(job), zone_multiplier);
            let plan = plan_production(spec, workers, multiplier, |kind| state.resources.get(kind));

            for (input, spent) in &plan.inputs_spent {
                state.resources.debit(*input, *spent, job.name());
            }

            match spec.output {
                JobOutput::Resource(resource) => {
                    let credited = state.resources.credit(resource, plan.output, job.name());
                    let total = report.production.entry(resource).or_insert(0);
                    *total = total.saturating_add(credited);
                    report.log(
                        LogTag::Production,
                        format!("{job}: {workers} workers produced {credited} {resource}."),
                    );
                }
                JobOutput::RepairPoints => {
                    state.tracking.pending_repair = state.tracking.pending_repair.saturating_add(plan.output);
                    report.repair_points = report.repair_points.saturating_add(plan.output);
                    report.log(
                        LogTag::Production,
                        format!("{job}: {workers} workers readied {} repair points.", plan.output),
                    );
                }
                JobOutput::Care => {
                    state.tracking.clinic_capacity = state.tracking.clinic_capacity.saturating_add(plan.output);
                    report.log(
                        LogTag::Production,
                        format!("{job}: {workers} staff can treat {} patients.", plan.output),
                    );
                }
            }
            debug!(day = state.day, %job, workers, output = plan.output, scale = %plan.scale, "job produced");
        }

        state.tracking.clinic_capacity = state
            .tracking
            .clinic_capacity
            .saturating_add(state.effects.clinic_bonus());
    }

    /// Stage 5: residents eat, drink, and burn fuel.
    pub(super) fn apply_consumption(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let penalties = &self.config.penalties;
        let residents = state.population.residents();
        let capacity = state.perimeter.active_capacity();

        let stacks = residents
            .saturating_sub(capacity)
            .checked_div(penalties.overcrowding_threshold)
            .unwrap_or(0);
        state.tracking.overcrowding_stacks = stacks;
        if stacks > 0 {
            report.log(
                LogTag::Overcrowding,
                format!("{residents} people crowd into space for {capacity}."),
            );
        }
        let surcharge = pct(100_u32.saturating_add(stacks.saturating_mul(penalties.overcrowding_surcharge_pct)));

        for (&resource, &rate) in &self.config.economy.consumption_pct {
            let mut multiplier = compound(pct(rate), state.effects.need_multiplier(resource));
            if matches!(resource, ResourceKind::Food | ResourceKind::Water) {
                multiplier = compound(multiplier, surcharge);
            }
            let needed = ceil_u32(scale(residents, multiplier));
            let consumed = state.resources.debit(resource, needed, "consumption");
            let line = ConsumptionLine {
                resource,
                needed,
                consumed,
            };

            report.log(
                LogTag::Consumption,
                format!("{consumed} of {needed} {resource} consumed."),
            );
            let shortfall = line.shortfall();
            if shortfall > 0 {
                state.tracking.deficits.insert(resource);
                state.tracking.shortfalls.insert(resource, shortfall);
                report.log(LogTag::Deficit, format!("{resource} ran short by {shortfall}."));
            }
            report.consumption.push(line);
        }

        let empty = state.resources.get(ResourceKind::Food) == 0 && state.resources.get(ResourceKind::Water) == 0;
        state.tracking.both_empty_days = if empty {
            state.tracking.both_empty_days.saturating_add(1)
        } else {
            0
        };
    }

    /// Stage 6: shortfall penalties, starvation, and overcrowding.
    pub(super) fn apply_penalties(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let penalties = &self.config.penalties;

        for resource in ResourceKind::ALL {
            if !state.tracking.in_deficit(resource) {
                state.tracking.consecutive_deficits.remove(&resource);
                continue;
            }
            let streak = state.tracking.consecutive_deficits.entry(resource).or_insert(0);
            *streak = streak.saturating_add(1);

            if let Some(penalty) = penalties.deficit(resource) {
                state.shift(StatKind::Unrest, signed(penalty.unrest));
                state.shift(StatKind::Morale, signed(penalty.morale).saturating_neg());
                state.shift(StatKind::Sickness, signed(penalty.sickness));
                report.log(
                    LogTag::Deficit,
                    format!(
                        "Without {resource}: unrest +{}, morale -{}, sickness +{}.",
                        penalty.unrest, penalty.morale, penalty.sickness
                    ),
                );
            }
        }

        if state.tracking.streak(ResourceKind::Food) >= penalties.starvation_grace_days {
            let shortfall = state
                .tracking
                .shortfalls
                .get(&ResourceKind::Food)
                .copied()
                .unwrap_or(0);
            let toll = state.population.starve(div_ceil(shortfall, penalties.starvation_divisor));
            let dead = toll.total();
            if dead > 0 {
                state.record_deaths(report, dead);
                report.log(LogTag::Deficit, format!("{dead} people starved to death."));
            }
        }

        let stacks = state.tracking.overcrowding_stacks;
        if stacks > 0 {
            let unrest = stacks.saturating_mul(penalties.overcrowding_unrest);
            let sickness = stacks.saturating_mul(penalties.overcrowding_sickness);
            state.shift(StatKind::Unrest, signed(unrest));
            state.shift(StatKind::Sickness, signed(sickness));
            report.log(
                LogTag::Overcrowding,
                format!("Overcrowding: unrest +{unrest}, sickness +{sickness}."),
            );
        }

        state.fit_allocation(report);
    }
}
