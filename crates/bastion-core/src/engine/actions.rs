//! Stages 2 and 3: the player's action and daily law effects.

use bastion_types::{DayResolutionReport, LawId, LogTag, MissionId, OrderId, TurnActionChoice};
use tracing::{info, warn};

use super::Engine;
use crate::rules::{Cooldown, RuleRefusal};
use crate::state::{ActiveMission, GameState};

impl Engine {
    /// Attempt the first populated field of `choice`. The rest are logged
    /// as ignored.
    pub(super) fn apply_action(
        &self,
        state: &mut GameState,
        choice: &TurnActionChoice,
        report: &mut DayResolutionReport,
    ) {
        let mut ignored = Vec::new();

        if let Some(law) = &choice.law {
            if choice.order.is_some() {
                ignored.push("order");
            }
            if choice.mission.is_some() {
                ignored.push("mission");
            }
            let result = self.enact_law(state, law, report);
            refused(state.day, "law", law.as_str(), result, report);
        } else if let Some(order) = &choice.order {
            if choice.mission.is_some() {
                ignored.push("mission");
            }
            let result = self.issue_order(state, order, report);
            refused(state.day, "order", order.as_str(), result, report);
        } else if let Some(mission) = &choice.mission {
            let result = self.dispatch_mission(state, mission, report);
            refused(state.day, "mission", mission.as_str(), result, report);
        }

        for kind in ignored {
            report.log(
                LogTag::Action,
                format!("The {kind} was ignored: only one action can be taken per day."),
            );
        }
        state.fit_allocation(report);
    }

    fn enact_law(
        &self,
        state: &mut GameState,
        id: &LawId,
        report: &mut DayResolutionReport,
    ) -> Result<(), RuleRefusal> {
        let law = self.catalog.law(id.as_str()).ok_or_else(|| RuleRefusal::Unknown {
            kind: "law",
            id: id.to_string(),
        })?;
        law.can_enact(state)?;
        if state.law_active(law.id()) {
            return Err(RuleRefusal::AlreadyActive);
        }
        if let Some(ready_on) = state
            .cooldowns
            .law_ready_on(state.day, self.config.run.law_cooldown_days)
        {
            return Err(RuleRefusal::OnCooldown { ready_on });
        }
        state.resources.try_spend(&law.cost(), law.id())?;

        state.active_laws.push(LawId::from(law.id()));
        state.cooldowns.enacted_law(state.day);
        report.log(LogTag::Action, format!("{} enacted.", law.name()));
        law.on_enact(state, report);
        info!(day = state.day, law = law.id(), "law enacted");
        Ok(())
    }

    fn issue_order(
        &self,
        state: &mut GameState,
        id: &OrderId,
        report: &mut DayResolutionReport,
    ) -> Result<(), RuleRefusal> {
        let order = self.catalog.order(id.as_str()).ok_or_else(|| RuleRefusal::Unknown {
            kind: "order",
            id: id.to_string(),
        })?;
        order.can_issue(state)?;
        let key = OrderId::from(order.id());
        match order.cooldown() {
            Cooldown::Once if state.cooldowns.order_used(&key) => return Err(RuleRefusal::Spent),
            Cooldown::Once => {}
            Cooldown::Days(days) => {
                if let Some(ready_on) = state.cooldowns.order_ready_on(&key, state.day, days) {
                    return Err(RuleRefusal::OnCooldown { ready_on });
                }
            }
        }
        state.resources.try_spend(&order.cost(), order.id())?;

        state.cooldowns.issued_order(key.clone(), state.day);
        state.active_order = Some(key);
        report.log(LogTag::Action, format!("{} issued.", order.name()));
        order.apply(state, report);
        info!(day = state.day, order = order.id(), "order issued");
        Ok(())
    }

    fn dispatch_mission(
        &self,
        state: &mut GameState,
        id: &MissionId,
        report: &mut DayResolutionReport,
    ) -> Result<(), RuleRefusal> {
        let mission = self.catalog.mission(id.as_str()).ok_or_else(|| RuleRefusal::Unknown {
            kind: "mission",
            id: id.to_string(),
        })?;
        mission.can_start(state)?;
        if state.mission_active(mission.id()) {
            return Err(RuleRefusal::AlreadyActive);
        }
        let key = MissionId::from(mission.id());
        if let Some(ready_on) = state
            .cooldowns
            .mission_ready_on(&key, state.day, mission.cooldown_days())
        {
            return Err(RuleRefusal::OnCooldown { ready_on });
        }
        let crew = mission.crew();
        state.population.commit_crew(crew.workers, crew.guards)?;

        state.active_missions.push(ActiveMission {
            id: key.clone(),
            days_remaining: mission.duration_days(),
            workers: crew.workers,
            guards: crew.guards,
            started_on: state.day,
        });
        state.cooldowns.dispatched_mission(key, state.day);
        report.log(
            LogTag::Mission,
            format!(
                "{} sets out with {} workers and {} guards for {} days.",
                mission.name(),
                crew.workers,
                crew.guards,
                mission.duration_days()
            ),
        );
        info!(day = state.day, mission = mission.id(), "mission dispatched");
        Ok(())
    }

    /// Stage 3: every active law's daily effect, in catalog order.
    pub(super) fn apply_passives(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        for law in self.catalog.laws() {
            if state.law_active(law.id()) {
                law.apply_daily(state, report);
            }
        }
    }
}

/// Log a refused action. The day goes on.
fn refused(
    day: u32,
    kind: &'static str,
    id: &str,
    result: Result<(), RuleRefusal>,
    report: &mut DayResolutionReport,
) {
    if let Err(refusal) = result {
        warn!(day, kind, id, %refusal, "action refused");
        report.log(LogTag::Action, format!("Cannot act on {kind} {id}: {refusal}."));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_types::{ResourceKind, StatKind};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::SimulationConfig;

    fn setup() -> (Engine, GameState) {
        let engine = Engine::standard(SimulationConfig::default()).unwrap();
        let state = engine.new_game().unwrap();
        (engine, state)
    }

    fn action_lines(report: &DayResolutionReport) -> Vec<String> {
        report
            .entries_tagged(LogTag::Action)
            .map(|entry| entry.message.clone())
            .collect()
    }

    #[test]
    fn law_takes_precedence_over_order_and_mission() {
        let (engine, mut state) = setup();
        let choice = TurnActionChoice {
            law: Some(LawId::from("strict_rationing")),
            order: Some(OrderId::from("double_rations")),
            mission: Some(MissionId::from("forage_beyond_walls")),
        };
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &choice, &mut report);

        assert!(state.law_active("strict_rationing"));
        assert!(state.active_order.is_none());
        assert!(state.active_missions.is_empty());
        let lines = action_lines(&report);
        assert_eq!(lines.iter().filter(|line| line.contains("ignored")).count(), 2);
    }

    #[test]
    fn order_beats_mission() {
        let (engine, mut state) = setup();
        let choice = TurnActionChoice {
            law: None,
            order: Some(OrderId::from("double_rations")),
            mission: Some(MissionId::from("forage_beyond_walls")),
        };
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &choice, &mut report);

        assert_eq!(state.active_order, Some(OrderId::from("double_rations")));
        assert!(state.active_missions.is_empty());
    }

    #[test]
    fn unknown_law_is_refused_and_logged() {
        let (engine, mut state) = setup();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::enact("divine_right"), &mut report);

        assert!(state.active_laws.is_empty());
        assert!(action_lines(&report).iter().any(|line| line.contains("no law named divine_right")));
    }

    #[test]
    fn law_cooldown_is_shared() {
        let (engine, mut state) = setup();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::enact("strict_rationing"), &mut report);
        engine.apply_action(&mut state, &TurnActionChoice::enact("triage_protocol"), &mut report);

        assert_eq!(state.active_laws, vec![LawId::from("strict_rationing")]);
        assert!(action_lines(&report).iter().any(|line| line.contains("on cooldown")));
    }

    #[test]
    fn active_law_cannot_be_enacted_twice() {
        let (engine, mut state) = setup();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::enact("strict_rationing"), &mut report);
        state.day = 10;
        engine.apply_action(&mut state, &TurnActionChoice::enact("strict_rationing"), &mut report);

        assert_eq!(state.active_laws.len(), 1);
        assert!(action_lines(&report).iter().any(|line| line.contains("already active")));
    }

    #[test]
    fn one_use_order_is_spent() {
        let (engine, mut state) = setup();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::issue("burn_outer_fields"), &mut report);
        let fuel = state.resources.get(ResourceKind::Fuel);
        state.day = 30;
        engine.apply_action(&mut state, &TurnActionChoice::issue("burn_outer_fields"), &mut report);

        assert_eq!(state.resources.get(ResourceKind::Fuel), fuel);
        assert!(action_lines(&report).iter().any(|line| line.contains("already used")));
    }

    #[test]
    fn unaffordable_order_costs_nothing() {
        let (engine, mut state) = setup();
        let materials = state.resources.get(ResourceKind::Materials);
        state.resources.debit(ResourceKind::Materials, materials, "test");
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::issue("emergency_repairs"), &mut report);

        assert!(state.active_order.is_none());
        assert!(action_lines(&report).iter().any(|line| line.contains("cannot pay")));
    }

    #[test]
    fn mission_commits_its_crew() {
        let (engine, mut state) = setup();
        let available = state.population.available_workers();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::dispatch("forage_beyond_walls"), &mut report);

        assert_eq!(state.active_missions.len(), 1);
        let crew = state.active_missions.first().unwrap().workers;
        assert_eq!(state.population.available_workers(), available.saturating_sub(crew));
        assert!(report.has_tag(LogTag::Mission));
    }

    #[test]
    fn unmet_requirement_is_refused() {
        let (engine, mut state) = setup();
        let mut report = DayResolutionReport::new(1);
        engine.apply_action(&mut state, &TurnActionChoice::enact("curfew"), &mut report);

        assert!(state.active_laws.is_empty());
        assert!(action_lines(&report).iter().any(|line| line.contains("requires Tyranny")));
    }

    #[test]
    fn passives_run_for_active_laws_only() {
        let (engine, mut state) = setup();
        let morale = state.stats.get(StatKind::Morale);
        let mut report = DayResolutionReport::new(1);
        engine.apply_passives(&mut state, &mut report);
        assert_eq!(state.stats.get(StatKind::Morale), morale);

        state.active_laws.push(LawId::from("strict_rationing"));
        engine.apply_passives(&mut state, &mut report);
        assert_eq!(state.stats.get(StatKind::Morale), morale.saturating_sub(1));
        assert_eq!(state.effects.need_multiplier(ResourceKind::Food), dec!(0.8));
    }
}
