//! Integration tests that drive whole days through the public engine API.
//!
//! Each test builds a fresh default game, adjusts the state directly where
//! a scenario needs it, and resolves days with [`Engine::resolve_day`].

#![allow(clippy::unwrap_used)]

use bastion_core::state::{ActiveMission, GameState};
use bastion_core::{Engine, SimulationConfig};
use bastion_ledger::Flow;
use bastion_people::JobAllocation;
use bastion_types::{
    DayResolutionReport, EventId, GameOverCause, LawId, LogTag, MissionId, OrderId, ResourceKind, RunOutcome, StatKind,
    TurnActionChoice, ZoneId,
};

fn new_game() -> (Engine, GameState) {
    let engine = Engine::standard(SimulationConfig::default()).unwrap();
    let state = engine.new_game().unwrap();
    (engine, state)
}

fn idle(engine: &Engine, state: &mut GameState) -> DayResolutionReport {
    engine.resolve_day(state, &TurnActionChoice::idle()).unwrap()
}

fn consumed(report: &DayResolutionReport, resource: ResourceKind) -> (u32, u32) {
    report
        .consumption
        .iter()
        .find(|line| line.resource == resource)
        .map(|line| (line.needed, line.consumed))
        .unwrap()
}

fn empty(state: &mut GameState, resource: ResourceKind) {
    let amount = state.resources.get(resource);
    state.resources.debit(resource, amount, "test");
}

#[test]
fn opening_bombardment_on_the_first_day() {
    let (engine, mut state) = new_game();
    assert_eq!(engine.config().run.seed, 42);

    let report = idle(&engine, &mut state);

    assert!(report.triggered_events.contains(&EventId::from("opening_bombardment")));
    assert!(report.has_tag(LogTag::Event));
    assert_eq!(report.zones_lost, Vec::<ZoneId>::new());
    assert_eq!(report.repair_points, 0);
    assert_eq!(
        state.perimeter.zone(ZoneId::OuterFarms).unwrap().integrity(),
        100_u32.saturating_sub(10).saturating_sub(report.siege_damage)
    );
    let burned: u32 = state
        .resources
        .journal()
        .iter()
        .filter(|entry| entry.reason == "opening_bombardment" && entry.flow == Flow::Debit)
        .map(|entry| entry.applied)
        .sum();
    assert_eq!(burned, 10);
    assert_eq!(state.day, 2);
}

#[test]
fn revolt_ends_the_day_before_anything_moves() {
    let (engine, mut state) = new_game();
    state.jobs = JobAllocation::new().with(bastion_types::JobKind::Farming, 10);
    state.stats.set(StatKind::Unrest, 90);
    let resources = state.resources.snapshot();
    let population = state.population.total();

    let report = idle(&engine, &mut state);

    assert_eq!(report.outcome, Some(RunOutcome::Lost(GameOverCause::Revolt)));
    assert_eq!(state.resources.snapshot(), resources);
    assert_eq!(state.population.total(), population);
    assert!(!report.has_tag(LogTag::Production));
    assert!(report.consumption.is_empty());
    assert!(report.triggered_events.is_empty());
    assert!(report.has_tag(LogTag::GameOver));
    assert_eq!(state.day, 2);

    let again = engine.resolve_day(&mut state, &TurnActionChoice::idle());
    assert!(again.is_err());
}

#[test]
fn revolt_mid_day_freezes_the_later_stages() {
    let (engine, mut state) = new_game();
    let threshold = engine.config().outcome.revolt_unrest;
    state.stats.set(StatKind::Unrest, threshold.saturating_sub(2));
    empty(&mut state, ResourceKind::Water);

    // A crew due home today.
    state.population.commit_crew(5, 0).unwrap();
    state.active_missions.push(ActiveMission {
        id: MissionId::from("forage_beyond_walls"),
        days_remaining: 1,
        workers: 5,
        guards: 0,
        started_on: 0,
    });
    let missions = state.active_missions.clone();
    let perimeter = state.perimeter.clone();
    let siege = state.siege.clone();
    let resources = state.resources.snapshot();
    let sick = state.population.sick();

    let report = idle(&engine, &mut state);

    // The water deficit penalty pushes unrest over the line at stage 6.
    assert!(report.deficits.contains(&ResourceKind::Water));
    assert_eq!(report.outcome, Some(RunOutcome::Lost(GameOverCause::Revolt)));
    assert!(state.stats.unrest() >= threshold);

    assert_eq!(state.perimeter, perimeter);
    assert_eq!(state.siege, siege);
    assert_eq!(report.siege_damage, 0);
    assert!(!report.has_tag(LogTag::Siege));
    assert!(report.triggered_events.is_empty());
    assert!(state.fired_events.is_empty());
    assert!(report.resolved_missions.is_empty());
    assert_eq!(state.active_missions, missions);
    assert_eq!(state.population.sick(), sick);
    assert_eq!(report.recovery.new_cases, 0);

    // Only the day's consumption touched the stockpile.
    for resource in ResourceKind::ALL {
        let eaten = report
            .consumption
            .iter()
            .find(|line| line.resource == resource)
            .map_or(0, |line| line.consumed);
        assert_eq!(
            state.resources.get(resource),
            resources.get(&resource).copied().unwrap_or(0).saturating_sub(eaten),
            "{resource:?}"
        );
    }
}

#[test]
fn total_collapse_on_the_second_empty_day() {
    let (engine, mut state) = new_game();
    empty(&mut state, ResourceKind::Food);
    empty(&mut state, ResourceKind::Water);

    let first = idle(&engine, &mut state);
    assert_eq!(first.outcome, None);
    assert_eq!(state.tracking.both_empty_days, 1);

    let second = idle(&engine, &mut state);
    assert_eq!(second.outcome, Some(RunOutcome::Lost(GameOverCause::TotalCollapse)));
    assert_eq!(state.summary().unwrap().last_day, 2);
}

#[test]
fn idle_workers_still_eat() {
    let (engine, mut state) = new_game();
    assert_eq!(state.jobs.total(), 0);
    let food = state.resources.get(ResourceKind::Food);

    let report = idle(&engine, &mut state);
    assert!(!report.has_tag(LogTag::Production));
    let (needed, eaten) = consumed(&report, ResourceKind::Food);
    assert_eq!(needed, eaten);
    assert!(eaten > 0);
    assert_eq!(state.resources.get(ResourceKind::Food), food.saturating_sub(eaten).saturating_sub(10));

    let mut ran_short = false;
    while !state.is_over() && !ran_short {
        let report = idle(&engine, &mut state);
        assert!(!report.has_tag(LogTag::Production));
        ran_short = report.deficits.contains(&ResourceKind::Food);
    }
    assert!(ran_short || state.is_over());
}

#[test]
fn only_the_law_is_attempted_when_all_are_set() {
    let (engine, mut state) = new_game();
    let choice = TurnActionChoice {
        law: Some(LawId::from("strict_rationing")),
        order: Some(OrderId::from("double_rations")),
        mission: Some("forage_beyond_walls".into()),
    };

    let report = engine.resolve_day(&mut state, &choice).unwrap();
    assert!(state.law_active("strict_rationing"));
    assert!(state.active_missions.is_empty());
    assert_eq!(
        report
            .entries_tagged(LogTag::Action)
            .filter(|entry| entry.message.contains("ignored"))
            .count(),
        2
    );

    // The ignored order was never issued, so it is not on cooldown.
    let report = engine
        .resolve_day(&mut state, &TurnActionChoice::issue("double_rations"))
        .unwrap();
    assert!(
        report
            .entries_tagged(LogTag::Action)
            .any(|entry| entry.message == "Double Rations issued.")
    );
}

#[test]
fn enacted_law_applies_every_day() {
    let (engine, mut state) = new_game();
    for day in 1..=4 {
        let residents = state.population.residents();
        let choice = if day == 1 {
            TurnActionChoice::enact("strict_rationing")
        } else {
            TurnActionChoice::idle()
        };
        let report = engine.resolve_day(&mut state, &choice).unwrap();
        let (needed, _) = consumed(&report, ResourceKind::Food);
        assert_eq!(needed, residents.saturating_mul(4).div_ceil(5), "day {day}");
        if state.is_over() {
            break;
        }
    }
}

#[test]
fn same_seed_same_mission_outcome() {
    let outcomes: Vec<Vec<String>> = (0..2)
        .map(|_| {
            let (engine, mut state) = new_game();
            engine
                .resolve_day(&mut state, &TurnActionChoice::dispatch("forage_beyond_walls"))
                .unwrap();
            let mut outcomes = Vec::new();
            for _ in 0..3 {
                let report = idle(&engine, &mut state);
                outcomes.extend(report.resolved_missions.into_iter().map(|summary| summary.outcome));
            }
            outcomes
        })
        .collect();

    assert_eq!(outcomes.first().unwrap().len(), 1);
    assert_eq!(outcomes.first(), outcomes.last());
}

#[test]
fn no_recovery_above_the_threshold() {
    let (engine, mut state) = new_game();
    state.stats.set(StatKind::Sickness, 80);
    state.jobs = JobAllocation::new().with(bastion_types::JobKind::Clinic, 10);
    for _ in 0..5 {
        state.population.advance_recovery();
    }
    assert!(state.population.ready_to_recover() > 0);
    let sick = state.population.sick();

    let report = idle(&engine, &mut state);
    assert!(report.recovery.blocked);
    assert_eq!(report.recovery.recovered, 0);
    assert!(state.population.sick() >= sick.saturating_sub(report.recovery.deaths));
}
