//! Where each day's choices come from.
//!
//! The engine never decides anything on the player's behalf. Before each
//! day the runner asks an [`ActionSource`] for the day's
//! [`TurnActionChoice`] and an [`Allocator`] for the job allocation; while
//! the day resolves, an [`EventResponder`] answers respondable events. A
//! source could be a UI, a scripted bot, or a test stub.
//!
//! The stubs here ([`IdleActionSource`], [`KeepAllocation`],
//! [`DefaultResponder`]) let a run be driven end-to-end with no player at
//! all.

use std::collections::BTreeMap;

use bastion_people::JobAllocation;
use bastion_types::{JobKind, TurnActionChoice};

use crate::rules::Catalog;
use crate::state::GameState;

/// Errors that can occur while collecting a decision.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// The source gave up, for example because its input was closed.
    #[error("decision source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// A source of daily actions.
pub trait ActionSource {
    /// Choose today's action.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no decision can be produced at all.
    /// An action the rules refuse is not an error; the engine logs it.
    fn decide(&mut self, state: &GameState, catalog: &Catalog) -> Result<TurnActionChoice, DecisionError>;
}

/// Never acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleActionSource;

impl ActionSource for IdleActionSource {
    fn decide(&mut self, _state: &GameState, _catalog: &Catalog) -> Result<TurnActionChoice, DecisionError> {
        Ok(TurnActionChoice::idle())
    }
}

/// Plays a fixed script keyed by day. Unscripted days are idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedActionSource {
    script: BTreeMap<u32, TurnActionChoice>,
}

impl ScriptedActionSource {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `choice` on `day`, replacing anything already scripted.
    #[must_use]
    pub fn on(mut self, day: u32, choice: TurnActionChoice) -> Self {
        self.script.insert(day, choice);
        self
    }
}

impl ActionSource for ScriptedActionSource {
    fn decide(&mut self, state: &GameState, _catalog: &Catalog) -> Result<TurnActionChoice, DecisionError> {
        Ok(self.script.get(&state.day).cloned().unwrap_or_default())
    }
}

/// Decides how free workers are spread over jobs.
pub trait Allocator {
    /// Today's allocation. Must fit the available workers and be a
    /// multiple of `step` per job.
    fn allocate(&mut self, state: &GameState, step: u32) -> JobAllocation;
}

/// Keeps whatever allocation the state already holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAllocation;

impl Allocator for KeepAllocation {
    fn allocate(&mut self, state: &GameState, _step: u32) -> JobAllocation {
        state.jobs.clone()
    }
}

/// Splits the free workers as evenly as the step allows, earlier jobs
/// taking the remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenSpreadAllocator;

impl Allocator for EvenSpreadAllocator {
    fn allocate(&mut self, state: &GameState, step: u32) -> JobAllocation {
        let step = step.max(1);
        let chunks = state.population.available_workers().checked_div(step).unwrap_or(0);
        let jobs = u32::try_from(JobKind::ALL.len()).unwrap_or(1);
        let base = chunks.checked_div(jobs).unwrap_or(0);
        let extra = chunks.checked_rem(jobs).unwrap_or(0);

        let mut allocation = JobAllocation::new();
        for (index, job) in (0_u32..).zip(JobKind::ALL) {
            let share = if index < extra { base.saturating_add(1) } else { base };
            allocation.set(job, share.saturating_mul(step));
        }
        allocation
    }
}

/// Answers respondable events.
pub trait EventResponder {
    /// Pick one of `options` for `event`. `None`, or an answer not on the
    /// menu, selects the event's default.
    fn respond(&mut self, event: &str, options: &[&'static str], state: &GameState) -> Option<String>;
}

/// Always takes the default response.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResponder;

impl EventResponder for DefaultResponder {
    fn respond(&mut self, _event: &str, _options: &[&'static str], _state: &GameState) -> Option<String> {
        None
    }
}

/// Answers events from a fixed table keyed by event id.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponder {
    answers: BTreeMap<String, String>,
}

impl ScriptedResponder {
    /// A responder with no answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `event` with `response` every time it fires.
    #[must_use]
    pub fn answer(mut self, event: impl Into<String>, response: impl Into<String>) -> Self {
        self.answers.insert(event.into(), response.into());
        self
    }
}

impl EventResponder for ScriptedResponder {
    fn respond(&mut self, event: &str, _options: &[&'static str], _state: &GameState) -> Option<String> {
        self.answers.get(event).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_types::LawId;

    use super::*;
    use crate::config::SimulationConfig;

    fn state() -> GameState {
        GameState::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn idle_source_never_acts() {
        let catalog = Catalog::standard().unwrap();
        let choice = IdleActionSource.decide(&state(), &catalog).unwrap();
        assert!(choice.is_idle());
    }

    #[test]
    fn script_plays_on_its_day_only() {
        let catalog = Catalog::standard().unwrap();
        let mut source = ScriptedActionSource::new().on(2, TurnActionChoice::enact("curfew"));
        let mut state = state();

        assert!(source.decide(&state, &catalog).unwrap().is_idle());
        state.day = 2;
        assert_eq!(
            source.decide(&state, &catalog).unwrap().law,
            Some(LawId::from("curfew"))
        );
    }

    #[test]
    fn even_spread_uses_every_free_worker() {
        let state = state();
        let available = state.population.available_workers();
        let allocation = EvenSpreadAllocator.allocate(&state, 1);

        assert_eq!(allocation.total(), available);
        assert!(allocation.validate(available, 1).is_ok());
        let counts: Vec<u32> = allocation.iter().map(|(_, count)| count).collect();
        let most = counts.iter().max().copied().unwrap_or(0);
        let least = counts.iter().min().copied().unwrap_or(0);
        assert!(most.saturating_sub(least) <= 1);
    }

    #[test]
    fn even_spread_respects_the_step() {
        let state = state();
        let available = state.population.available_workers();
        let allocation = EvenSpreadAllocator.allocate(&state, 4);

        assert!(allocation.validate(available, 4).is_ok());
        assert!(allocation.total() <= available);
    }

    #[test]
    fn keep_allocation_is_unchanged() {
        let mut state = state();
        state.jobs = JobAllocation::new().with(JobKind::Farming, 12);
        assert_eq!(KeepAllocation.allocate(&state, 1), state.jobs);
    }

    #[test]
    fn responders() {
        let state = state();
        assert_eq!(DefaultResponder.respond("food_riot", &["ignore"], &state), None);

        let mut scripted = ScriptedResponder::new().answer("food_riot", "crackdown");
        assert_eq!(
            scripted.respond("food_riot", &["crackdown", "ignore"], &state),
            Some("crackdown".to_owned())
        );
        assert_eq!(scripted.respond("envoy_of_terms", &["refuse"], &state), None);
    }
}
