//! Day resolution: the 14-stage pipeline that turns one day's choices into
//! the next day's state.
//!
//! Each call to [`Engine::resolve_day`] runs these stages in order:
//!
//! 1. **Preparing** -- reject finished runs and bad allocations, reset the
//!    day's effects and tracking, open the ledger day, roll weather and
//!    disruption.
//!
//! 2. **Action** -- attempt the player's law, order, or mission (first
//!    populated field wins).
//!
//! 3. **Passives** -- daily effects of every active law, in catalog order.
//!
//! 4. **Production / Consumption / Penalties** -- jobs produce, residents
//!    eat and drink, shortfalls hurt.
//!
//! 5. **Sickness / Drift** -- sickness moves, the sick recover or die,
//!    unrest and morale drift.
//!
//! 6. **Siege / Repairs** -- the enemy escalates and strikes the active
//!    perimeter, repair crews patch it.
//!
//! 7. **Events / Missions** -- triggered events fire, returning crews roll
//!    their outcomes.
//!
//! 8. **Outcome / Finalizing** -- loss and survival checks, flag decay,
//!    conservation check, day advance.
//!
//! A loss guard runs after every mutating stage. Once the run is lost the
//! remaining stages are skipped and only finalization runs. Resolution is
//! deterministic given the same state, choice, and responder.

mod actions;
mod defense;
mod economy;
mod occurrences;
mod outcome;
mod welfare;

use bastion_ledger::ConservationResult;
use bastion_people::PeopleError;
use bastion_types::{DayResolutionReport, LogTag, RunOutcome, TurnActionChoice};
use bastion_world::{disruption_effects, roll_disruption, roll_weather, weather_need_effects};
use tracing::{debug, info, warn};

pub use outcome::loss_cause;

use crate::config::{ConfigError, SimulationConfig};
use crate::decision::{DefaultResponder, EventResponder};
use crate::rules::{Catalog, CatalogError};
use crate::state::GameState;

/// Errors that abort a day before any stage mutates state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The run already has an outcome.
    #[error("run already ended on day {day}: {outcome:?}")]
    RunEnded {
        /// The day that would have been resolved.
        day: u32,
        /// The recorded outcome.
        outcome: RunOutcome,
    },

    /// More workers are assigned than are free.
    #[error("allocation overflow: {assigned} workers assigned but only {available} available")]
    AllocationOverflow {
        /// Total workers assigned.
        assigned: u32,
        /// Healthy workers not away on missions.
        available: u32,
    },

    /// The allocation breaks another rule, such as the step size.
    #[error("invalid allocation: {source}")]
    InvalidAllocation {
        /// The underlying allocation error.
        source: PeopleError,
    },
}

impl From<PeopleError> for EngineError {
    fn from(source: PeopleError) -> Self {
        match source {
            PeopleError::AllocationOverflow {
                assigned,
                available,
            } => Self::AllocationOverflow {
                assigned,
                available,
            },
            other => Self::InvalidAllocation { source: other },
        }
    }
}

/// A stage of day resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPhase {
    /// Validation, resets, weather, and disruption.
    PreparingDay,
    /// The player's action.
    ApplyingAction,
    /// Daily law effects.
    ApplyingPassives,
    /// Job output.
    ComputingProduction,
    /// Daily needs.
    ApplyingConsumption,
    /// Shortfall, starvation, and overcrowding penalties.
    ApplyingPenalties,
    /// Sickness drift, recovery, new cases, and severe deaths.
    ApplyingSicknessAndRecovery,
    /// Unrest and morale drift.
    ApplyingUnrestMoraleDrift,
    /// Escalation and wall damage.
    ApplyingSiegeDamage,
    /// Wall repairs.
    ApplyingRepairs,
    /// Triggered events.
    ResolvingEvents,
    /// Returning missions.
    ResolvingMissions,
    /// Loss and survival checks.
    CheckingLossConditions,
    /// Decay, conservation check, and day advance.
    FinalizingDay,
}

impl DayPhase {
    /// Every stage in execution order.
    pub const PIPELINE: [Self; 14] = [
        Self::PreparingDay,
        Self::ApplyingAction,
        Self::ApplyingPassives,
        Self::ComputingProduction,
        Self::ApplyingConsumption,
        Self::ApplyingPenalties,
        Self::ApplyingSicknessAndRecovery,
        Self::ApplyingUnrestMoraleDrift,
        Self::ApplyingSiegeDamage,
        Self::ApplyingRepairs,
        Self::ResolvingEvents,
        Self::ResolvingMissions,
        Self::CheckingLossConditions,
        Self::FinalizingDay,
    ];

    /// Whether the loss guard runs after this stage.
    pub const fn guarded(self) -> bool {
        !matches!(self, Self::CheckingLossConditions | Self::FinalizingDay)
    }
}

/// The resolution engine: configuration plus the rule catalog.
///
/// The engine itself is immutable; all mutable data lives in
/// [`GameState`].
#[derive(Debug)]
pub struct Engine {
    config: SimulationConfig,
    catalog: Catalog,
}

impl Engine {
    /// Pair a configuration with a catalog.
    pub const fn new(config: SimulationConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// An engine over the standard rule set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the built-in catalog is malformed.
    pub fn standard(config: SimulationConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(config, Catalog::standard()?))
    }

    /// The active configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The rule catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A fresh day-1 state seeded from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the starting layout is invalid.
    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        GameState::new(&self.config)
    }

    /// Resolve one day, answering events with their default responses.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the run already ended or the job
    /// allocation is invalid. No state is changed in that case.
    pub fn resolve_day(
        &self,
        state: &mut GameState,
        choice: &TurnActionChoice,
    ) -> Result<DayResolutionReport, EngineError> {
        self.resolve_day_with(state, choice, &mut DefaultResponder)
    }

    /// Resolve one day, asking `responder` how to answer events.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the run already ended or the job
    /// allocation is invalid. No state is changed in that case.
    pub fn resolve_day_with(
        &self,
        state: &mut GameState,
        choice: &TurnActionChoice,
        responder: &mut dyn EventResponder,
    ) -> Result<DayResolutionReport, EngineError> {
        self.check_preconditions(state)?;

        let day = state.day;
        let mut report = DayResolutionReport::new(day);

        for phase in DayPhase::PIPELINE {
            if state.is_over() && phase != DayPhase::FinalizingDay {
                continue;
            }
            debug!(day, ?phase, "stage");

            match phase {
                DayPhase::PreparingDay => self.prepare_day(state, &mut report),
                DayPhase::ApplyingAction => self.apply_action(state, choice, &mut report),
                DayPhase::ApplyingPassives => self.apply_passives(state, &mut report),
                DayPhase::ComputingProduction => self.compute_production(state, &mut report),
                DayPhase::ApplyingConsumption => self.apply_consumption(state, &mut report),
                DayPhase::ApplyingPenalties => self.apply_penalties(state, &mut report),
                DayPhase::ApplyingSicknessAndRecovery => self.apply_sickness(state, &mut report),
                DayPhase::ApplyingUnrestMoraleDrift => self.apply_drift(state, &mut report),
                DayPhase::ApplyingSiegeDamage => self.apply_siege(state, &mut report),
                DayPhase::ApplyingRepairs => self.apply_repairs(state, &mut report),
                DayPhase::ResolvingEvents => self.resolve_events(state, &mut report, responder),
                DayPhase::ResolvingMissions => self.resolve_missions(state, &mut report),
                DayPhase::CheckingLossConditions => self.check_outcome(state, &mut report),
                DayPhase::FinalizingDay => self.finalize_day(state, &mut report),
            }

            if phase.guarded() {
                self.guard(state, &mut report);
            }
        }

        Ok(report)
    }

    /// Caller contract checks. Must not mutate.
    fn check_preconditions(&self, state: &GameState) -> Result<(), EngineError> {
        if let Some(outcome) = state.outcome {
            return Err(EngineError::RunEnded {
                day: state.day,
                outcome,
            });
        }
        state
            .jobs
            .validate(state.population.available_workers(), self.config.run.allocation_step)?;
        Ok(())
    }

    /// Stage 1: resets, weather, and disruption.
    fn prepare_day(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let day = state.day;
        let siege = &self.config.siege;

        state.effects.reset();
        state.tracking.reset_day();
        state.resources.open_day(day);

        let weather = roll_weather(&mut state.rng, &siege.weather, state.tracking.weather);
        let disruption = roll_disruption(&mut state.rng, &siege.disruptions);
        state.tracking.weather = weather;
        state.tracking.disruption = disruption;

        for (resource, multiplier) in weather_need_effects(weather, &siege.weather) {
            state.effects.scale_need(resource, multiplier);
        }
        report.weather = weather;
        report.log(LogTag::Day, format!("Day {day} dawns. Weather: {weather:?}."));

        if let Some(disruption) = disruption {
            for (job, multiplier) in disruption_effects(disruption, &siege.disruptions) {
                state.effects.scale_job(job, multiplier);
            }
            report.disruption = Some(disruption);
            report.log(LogTag::Day, format!("Disruption: {disruption:?}."));
        }

        debug!(day, ?weather, ?disruption, "day prepared");
    }

    /// Settle fallen zones, then record a loss if one applies.
    fn guard(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        self.settle_zone_losses(state, report);
        if state.is_over() {
            return;
        }
        if let Some(cause) = loss_cause(&self.config.outcome, state) {
            end_run(state, report, RunOutcome::Lost(cause));
        }
    }

    /// Stage 13: final loss check, then survival.
    fn check_outcome(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        if let Some(cause) = loss_cause(&self.config.outcome, state) {
            end_run(state, report, RunOutcome::Lost(cause));
        } else if state.day >= self.config.run.target_day {
            end_run(state, report, RunOutcome::Survived);
        }
    }

    /// Stage 14: decay, conservation, report summary, day advance.
    #[allow(clippy::unused_self)]
    fn finalize_day(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let day = state.day;

        state.flags.tick();
        state.tracking.plague_days = state.tracking.plague_days.saturating_sub(1);
        state.active_order = None;

        if let ConservationResult::Anomaly(anomaly) = state.resources.verify_conservation() {
            warn!(day, %anomaly, "ledger conservation violated");
        }

        report.deficits = state.tracking.deficits.iter().copied().collect();
        report.outcome = state.outcome;

        state.history.days_played = state.history.days_played.saturating_add(1);
        info!(
            day,
            outcome = ?state.outcome,
            deficits = ?report.deficits,
            events = report.triggered_events.len(),
            deaths = report.deaths.saturating_add(report.recovery.deaths),
            "day resolved"
        );
        state.day = day.saturating_add(1);
    }
}

/// Record the run's outcome.
fn end_run(state: &mut GameState, report: &mut DayResolutionReport, outcome: RunOutcome) {
    state.outcome = Some(outcome);
    report.outcome = Some(outcome);
    let message = match outcome {
        RunOutcome::Survived => format!("The city held until day {}. The siege is lifted.", state.day),
        RunOutcome::Lost(cause) => format!("The city has fallen: {cause}."),
    };
    report.log(LogTag::GameOver, message);
    info!(day = state.day, ?outcome, "run ended");
}

/// Convert a configured magnitude to a signed stat delta.
fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
