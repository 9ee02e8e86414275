//! Whole-run driver.
//!
//! [`run_to_end`] loops day resolution until the run has an outcome:
//!
//! - **Allocation**: the [`Allocator`] writes today's jobs into the state
//! - **Decision**: the [`ActionSource`] picks today's action
//! - **Resolution**: [`Engine::resolve_day_with`] runs the pipeline
//! - **Callback**: the [`DayCallback`] sees each finished report
//!
//! A run always ends: every resolved day advances the clock, and the
//! target day forces an outcome.

use bastion_types::{DayResolutionReport, RunSummary};
use tracing::{info, warn};

use crate::decision::{ActionSource, Allocator, DecisionError, EventResponder};
use crate::engine::{Engine, EngineError};
use crate::state::GameState;

/// Errors that can stop a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Day resolution refused the day.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: EngineError,
    },

    /// The action source failed.
    #[error("decision error: {source}")]
    Decision {
        /// The underlying decision error.
        #[from]
        source: DecisionError,
    },

    /// The loop exited without an outcome.
    #[error("run stopped on day {day} without an outcome")]
    Unfinished {
        /// The day the run stopped on.
        day: u32,
    },
}

/// Called after each day resolves.
pub trait DayCallback {
    /// Inspect the finished day.
    fn on_day(&mut self, report: &DayResolutionReport, state: &GameState);
}

/// A callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl DayCallback for NoOpCallback {
    fn on_day(&mut self, _report: &DayResolutionReport, _state: &GameState) {}
}

/// Resolve days until the run ends, then return its summary.
///
/// # Errors
///
/// Returns [`RunnerError`] if a decision cannot be made or the engine
/// refuses a day (an allocator that overflows the workforce, for example).
pub fn run_to_end(
    engine: &Engine,
    state: &mut GameState,
    actions: &mut dyn ActionSource,
    allocator: &mut dyn Allocator,
    responder: &mut dyn EventResponder,
    callback: &mut dyn DayCallback,
) -> Result<RunSummary, RunnerError> {
    let config = engine.config();
    info!(
        seed = config.run.seed,
        target_day = config.run.target_day,
        start_day = state.day,
        "run starting"
    );

    while !state.is_over() {
        state.jobs = allocator.allocate(state, config.run.allocation_step);
        let choice = actions.decide(state, engine.catalog())?;
        let report = engine.resolve_day_with(state, &choice, responder)?;
        callback.on_day(&report, state);
    }

    let summary = state
        .summary()
        .ok_or(RunnerError::Unfinished { day: state.day })?;
    log_run_end(&summary);
    Ok(summary)
}

/// Log the end-of-run digest.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        outcome = ?summary.outcome,
        last_day = summary.last_day,
        days_played = summary.days_played,
        survivors = summary.survivors,
        total_deaths = summary.total_deaths,
        "Run ended"
    );
    info!(
        morale = summary.morale,
        unrest = summary.unrest,
        sickness = summary.sickness,
        laws = ?summary.laws,
        zones_lost = ?summary.zones_lost,
        resources = ?summary.final_resources,
        "Final state"
    );
    if summary.survivors == 0 {
        warn!("Nobody survived");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_types::RunOutcome;

    use super::*;
    use crate::config::SimulationConfig;
    use crate::decision::{DefaultResponder, EvenSpreadAllocator, IdleActionSource};

    struct Counter {
        days: Vec<u32>,
    }

    impl DayCallback for Counter {
        fn on_day(&mut self, report: &DayResolutionReport, _state: &GameState) {
            self.days.push(report.day);
        }
    }

    #[test]
    fn run_terminates_with_a_summary() {
        let engine = Engine::standard(SimulationConfig::default()).unwrap();
        let mut state = engine.new_game().unwrap();
        let mut counter = Counter { days: Vec::new() };

        let summary = run_to_end(
            &engine,
            &mut state,
            &mut IdleActionSource,
            &mut EvenSpreadAllocator,
            &mut DefaultResponder,
            &mut counter,
        )
        .unwrap();

        assert!(summary.last_day <= engine.config().run.target_day);
        assert_eq!(summary.days_played, summary.last_day);
        assert_eq!(counter.days.len(), usize::try_from(summary.days_played).unwrap());
        assert_eq!(counter.days.first(), Some(&1));
        if summary.outcome == RunOutcome::Survived {
            assert_eq!(summary.last_day, engine.config().run.target_day);
        }
    }

    #[test]
    fn finished_run_returns_immediately() {
        let engine = Engine::standard(SimulationConfig::default()).unwrap();
        let mut state = engine.new_game().unwrap();
        state.outcome = Some(RunOutcome::Survived);

        let summary = run_to_end(
            &engine,
            &mut state,
            &mut IdleActionSource,
            &mut EvenSpreadAllocator,
            &mut DefaultResponder,
            &mut NoOpCallback,
        )
        .unwrap();
        assert_eq!(summary.days_played, 0);
    }
}
