//! Stages 7 and 8: sickness, recovery, and the public mood.

use bastion_people::{DriftInputs, health, morale};
use bastion_types::{DayResolutionReport, LogTag, RecoveryStats, ResourceKind, StatKind};
use tracing::debug;

use super::Engine;
use crate::state::GameState;

impl Engine {
    /// Stage 7: drift, recovery, new cases, and severe deaths.
    pub(super) fn apply_sickness(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let config = &self.config.health;

        let drift = health::sickness_drift(
            config,
            state.stats.unrest(),
            state.resources.get(ResourceKind::Fuel) == 0,
            state.tracking.plague(),
        );
        state.shift(StatKind::Sickness, drift);
        if config.recovery_enabled {
            state.population.advance_recovery();
        }

        let sickness = state.stats.sickness();
        let mut stats = RecoveryStats::default();

        if health::recovery_blocked(config, sickness) {
            stats.blocked = true;
            report.log(
                LogTag::Recovery,
                format!("Sickness at {sickness}: the clinic cannot send anyone home."),
            );
        } else {
            let allowance = health::recovery_allowance(
                config,
                state.population.ready_to_recover(),
                state.tracking.clinic_capacity,
                state.resources.get(ResourceKind::Medicine),
            );
            let recovered = state.population.recover(allowance);
            if recovered > 0 {
                state
                    .resources
                    .debit(ResourceKind::Medicine, health::medicine_for(config, recovered), "treatment");
                report.log(LogTag::Recovery, format!("{recovered} patients returned to work."));
            }
            stats.recovered = recovered;
        }

        let deficits = u32::try_from(state.tracking.deficits.len()).unwrap_or(u32::MAX);
        let cases = health::new_cases(config, state.population.available_workers(), sickness, deficits);
        let fell_sick = state
            .population
            .fall_sick(cases, health::cohort_duration(config, sickness));
        if fell_sick > 0 {
            report.log(LogTag::Sickness, format!("{fell_sick} workers fell sick."));
        }
        stats.new_cases = fell_sick;

        let severe = health::severe_deaths(config, sickness, state.population.sick());
        let died = state.population.kill_sick(severe);
        state.record_deaths(report, died);
        if died > 0 {
            report.log(LogTag::Sickness, format!("{died} of the sick died."));
        }
        stats.deaths = died;

        debug!(day = state.day, drift, sickness, ?stats, "sickness resolved");
        report.recovery = stats;
        state.fit_allocation(report);
    }

    /// Stage 8: unrest and morale drift.
    pub(super) fn apply_drift(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let inputs = DriftInputs {
            morale: state.stats.morale(),
            unrest: state.stats.unrest(),
            sickness: state.stats.sickness(),
            guards_at_home: state.population.guards_at_home(),
            lost_zones: state.perimeter.lost_count(),
            deficit_free: state.tracking.deficits.is_empty(),
        };
        let drift = morale::drift(&self.config.morale, &inputs);
        state.shift(StatKind::Unrest, drift.unrest);
        state.shift(StatKind::Morale, drift.morale);
        if drift.unrest != 0 || drift.morale != 0 {
            report.log(
                LogTag::Morale,
                format!("Unrest {:+}, morale {:+}.", drift.unrest, drift.morale),
            );
        }
    }
}
