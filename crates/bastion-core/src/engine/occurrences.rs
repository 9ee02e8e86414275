//! Stages 11 and 12: triggered events and returning missions.

use bastion_types::{DayResolutionReport, EventId, MissionSummary};
use rand::Rng;
use tracing::{info, warn};

use super::Engine;
use crate::decision::EventResponder;
use crate::rules::{Trigger, TriggeredEvent, select_band};
use crate::state::{ActiveMission, GameState};

impl Engine {
    /// Stage 11: tick cooldowns, then evaluate every event in catalog
    /// order. Stops early if an event ends the run.
    pub(super) fn resolve_events(
        &self,
        state: &mut GameState,
        report: &mut DayResolutionReport,
        responder: &mut dyn EventResponder,
    ) {
        state.cooldowns.tick_events();

        for event in self.catalog.events() {
            let id = EventId::from(event.id());
            if event.once() && state.fired_events.contains(&id) {
                continue;
            }
            if state.cooldowns.event_remaining(&id) > 0 {
                continue;
            }
            let fires = match event.trigger(state) {
                Trigger::Never => false,
                Trigger::Always => true,
                Trigger::Chance(percent) => state.rng.random_range(0..100_u32) < percent,
            };
            if !fires {
                continue;
            }

            let response = choose_response(&**event, state, responder);
            event.apply(state, report, response);

            state.cooldowns.start_event(id.clone(), event.cooldown_days());
            if event.once() {
                state.fired_events.insert(id.clone());
            }
            state.history.events_fired.push(id.clone());
            report.triggered_events.push(id);
            info!(day = state.day, event = event.id(), ?response, "event fired");

            self.guard(state, report);
            if state.is_over() {
                break;
            }
        }

        state.fit_allocation(report);
    }

    /// Stage 12: count missions down and resolve the ones coming home.
    pub(super) fn resolve_missions(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let day = state.day;
        let mut away = Vec::new();

        for mut mission in core::mem::take(&mut state.active_missions) {
            if mission.started_on == day {
                away.push(mission);
                continue;
            }
            mission.days_remaining = mission.days_remaining.saturating_sub(1);
            if mission.days_remaining > 0 {
                away.push(mission);
                continue;
            }
            self.return_crew(state, report, &mission);
        }

        state.active_missions = away;
        state.fit_allocation(report);
    }

    /// Roll a returning mission's outcome and bring the survivors home.
    fn return_crew(&self, state: &mut GameState, report: &mut DayResolutionReport, mission: &ActiveMission) {
        let band = self
            .catalog
            .mission(mission.id.as_str())
            .and_then(|rule| {
                let roll = state.rng.random_range(0..100_u32);
                select_band(rule.bands(), roll).map(|band| (rule, band.key))
            });
        let Some((rule, key)) = band else {
            warn!(day = state.day, mission = %mission.id, "mission has no outcome, crew returns");
            state.population.release_crew(mission.workers, mission.guards);
            return;
        };

        let lost = rule.apply_outcome(key, state, report);
        let dead_workers = lost.workers.min(mission.workers);
        let dead_guards = lost.guards.min(mission.guards);
        let toll = state.population.lose_crew(dead_workers, dead_guards);
        state.population.release_crew(
            mission.workers.saturating_sub(dead_workers),
            mission.guards.saturating_sub(dead_guards),
        );
        state.record_deaths(report, toll.total());

        report.resolved_missions.push(MissionSummary {
            mission: mission.id.clone(),
            outcome: key.to_owned(),
            started_on: mission.started_on,
        });
        info!(day = state.day, mission = %mission.id, outcome = key, dead = toll.total(), "mission returned");
    }
}

/// The response to apply: the responder's choice if it is on the menu,
/// otherwise the event's default.
fn choose_response(
    event: &dyn TriggeredEvent,
    state: &GameState,
    responder: &mut dyn EventResponder,
) -> Option<&'static str> {
    let menu = event.responses();
    if menu.is_empty() {
        return None;
    }
    match responder.respond(event.id(), menu, state) {
        Some(choice) => menu
            .iter()
            .copied()
            .find(|option| *option == choice)
            .or_else(|| {
                warn!(event = event.id(), %choice, "unknown response, using the default");
                event.default_response()
            }),
        None => event.default_response(),
    }
}
