//! Emergency orders, in registration order.
//!
//! Orders act for a single day. Multipliers go into the daily effects and
//! vanish at the next reset; stat changes and flag shifts are immediate.

use bastion_ledger::ResourceBundle;
use bastion_types::numeric::pct;
use bastion_types::{DayResolutionReport, FlagPath, JobKind, LogTag, Milestone, ResourceKind, StatKind, ZoneId};

use super::{Cooldown, EmergencyOrder, RuleRefusal, require};
use crate::state::GameState;

/// Open the granaries for a feast.
pub struct DoubleRations;

impl EmergencyOrder for DoubleRations {
    fn id(&self) -> &'static str {
        "double_rations"
    }

    fn name(&self) -> &'static str {
        "Double Rations"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Food need +50% today; morale +8, unrest -4.".to_owned()
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(5)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.effects.scale_need(ResourceKind::Food, pct(150));
        state.shift(StatKind::Morale, 8);
        state.shift(StatKind::Unrest, -4);
        report.log(LogTag::Order, "Tonight everyone eats their fill.");
    }
}

/// Torch the outer farms before the enemy can use them.
pub struct BurnOuterFields;

impl EmergencyOrder for BurnOuterFields {
    fn id(&self) -> &'static str {
        "burn_outer_fields"
    }

    fn name(&self) -> &'static str {
        "Burn the Outer Fields"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Once only. Fuel +20, delays the next escalation by 2, morale -5; the Outer Farms are scorched.".to_owned()
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Once
    }

    fn can_issue(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.perimeter.is_standing(ZoneId::OuterFarms), "the Outer Farms standing")
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.resources.credit(ResourceKind::Fuel, 20, self.id());
        state.siege.add_delay(2);
        state.shift(StatKind::Morale, -5);
        state.perimeter.quarantine(ZoneId::OuterFarms);
        report.log(LogTag::Order, "Smoke rolls over the enemy lines from the burning fields.");
    }
}

/// Every spare hand to the walls.
pub struct EmergencyRepairs;

impl EmergencyOrder for EmergencyRepairs {
    fn id(&self) -> &'static str {
        "emergency_repairs"
    }

    fn name(&self) -> &'static str {
        "Emergency Repairs"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Costs 20 materials (have {}). Repairs doubled today.",
            state.resources.get(ResourceKind::Materials)
        )
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(3)
    }

    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new().with(ResourceKind::Materials, 20)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.effects.scale_job(JobKind::Repair, pct(200));
        report.log(LogTag::Order, "Scaffolds go up along the breach.");
    }
}

/// Strike the siege lines under cover of dark.
pub struct NightSortie;

impl NightSortie {
    const MIN_GUARDS: u32 = 10;
    const CASUALTIES: u32 = 2;
}

impl EmergencyOrder for NightSortie {
    fn id(&self) -> &'static str {
        "night_sortie"
    }

    fn name(&self) -> &'static str {
        "Night Sortie"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Delays the next escalation by 1 and halves today's siege damage; {} guards die. Requires {} guards at home (have {}).",
            Self::CASUALTIES,
            Self::MIN_GUARDS,
            state.population.guards_at_home()
        )
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(6)
    }

    fn can_issue(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(
            state.population.guards_at_home() >= Self::MIN_GUARDS,
            format!("{} guards at home", Self::MIN_GUARDS),
        )
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.siege.add_delay(1);
        state.effects.scale_siege(pct(50));
        let dead = state.population.kill_guards(Self::CASUALTIES);
        state.record_deaths(report, dead);
        report.log(
            LogTag::Order,
            format!("The sortie fires two siege engines; {dead} guards do not return."),
        );
    }
}

/// Brew remedies around the clock.
pub struct MedicineDrive;

impl EmergencyOrder for MedicineDrive {
    fn id(&self) -> &'static str {
        "medicine_drive"
    }

    fn name(&self) -> &'static str {
        "Medicine Drive"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Costs 10 fuel (have {}). Apothecary output doubled today.",
            state.resources.get(ResourceKind::Fuel)
        )
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(4)
    }

    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new().with(ResourceKind::Fuel, 10)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.effects.scale_job(JobKind::Apothecary, pct(200));
        report.log(LogTag::Order, "The apothecaries' fires burn all day.");
    }
}

/// Speak to the people from the keep steps.
pub struct AddressTheCrowd;

impl AddressTheCrowd {
    const TYRANT: i32 = 5;
}

impl EmergencyOrder for AddressTheCrowd {
    fn id(&self) -> &'static str {
        "address_the_crowd"
    }

    fn name(&self) -> &'static str {
        "Address the Crowd"
    }

    fn summary(&self, state: &GameState) -> String {
        if state.flags.get(FlagPath::Tyranny) >= Self::TYRANT {
            "The crowd no longer believes you: unrest +4.".to_owned()
        } else {
            "Morale +6, unrest -6. Backfires at Tyranny 5 or more.".to_owned()
        }
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(4)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        if state.flags.get(FlagPath::Tyranny) >= Self::TYRANT {
            state.shift(StatKind::Unrest, 4);
            report.log(LogTag::Order, "The speech is drowned out by jeers.");
        } else {
            state.shift(StatKind::Morale, 6);
            state.shift(StatKind::Unrest, -6);
            report.log(LogTag::Order, "The crowd cheers.");
        }
    }
}

/// Pyres outside the temple.
pub struct BurnTheDead;

impl EmergencyOrder for BurnTheDead {
    fn id(&self) -> &'static str {
        "burn_the_dead"
    }

    fn name(&self) -> &'static str {
        "Burn the Dead"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Costs 15 fuel (have {}). Sickness -8; Faith -1 for 4 days.",
            state.resources.get(ResourceKind::Fuel)
        )
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(5)
    }

    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new().with(ResourceKind::Fuel, 15)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.shift(StatKind::Sickness, -8);
        state.flags.add_temporary(FlagPath::Faith, -1, 4);
        report.log(LogTag::Order, "The priests protest as the pyres are lit.");
    }
}

/// Lock the stores.
pub struct SealTheGranaries;

impl EmergencyOrder for SealTheGranaries {
    fn id(&self) -> &'static str {
        "seal_the_granaries"
    }

    fn name(&self) -> &'static str {
        "Seal the Granaries"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Food need -30% today; unrest +6.".to_owned()
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(3)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.effects.scale_need(ResourceKind::Food, pct(70));
        state.shift(StatKind::Unrest, 6);
        report.log(LogTag::Order, "Guards bar the granary doors.");
    }
}

/// Seize private stores.
pub struct Requisition;

impl EmergencyOrder for Requisition {
    fn id(&self) -> &'static str {
        "requisition"
    }

    fn name(&self) -> &'static str {
        "Requisition"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Food +30, water +20; unrest +10, Tyranny +1. Requires martial law.".to_owned()
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(7)
    }

    fn can_issue(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.has(Milestone::MartialState), "martial law")
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.resources.credit(ResourceKind::Food, 30, self.id());
        state.resources.credit(ResourceKind::Water, 20, self.id());
        state.shift(StatKind::Unrest, 10);
        state.flags.adjust(FlagPath::Tyranny, 1);
        report.log(LogTag::Order, "Soldiers empty the merchants' cellars.");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::SimulationConfig;

    fn state() -> GameState {
        GameState::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn burn_outer_fields_scorches_the_farms() {
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        assert!(BurnOuterFields.can_issue(&state).is_ok());
        BurnOuterFields.apply(&mut state, &mut report);
        assert_eq!(state.resources.get(ResourceKind::Fuel), 170);
        assert_eq!(state.siege.escalation_delay, 2);
        assert_eq!(state.stats.morale(), 55);
        assert!(state.perimeter.zone(ZoneId::OuterFarms).unwrap().quarantined);
        assert_eq!(BurnOuterFields.cooldown(), Cooldown::Once);
    }

    #[test]
    fn burn_outer_fields_needs_the_farms() {
        let mut state = state();
        state.perimeter.damage_zone(ZoneId::OuterFarms, 100);
        assert!(BurnOuterFields.can_issue(&state).is_err());
    }

    #[test]
    fn night_sortie_costs_guards() {
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        NightSortie.apply(&mut state, &mut report);
        assert_eq!(state.population.guards(), 13);
        assert_eq!(report.deaths, 2);
        assert_eq!(state.history.total_deaths, 2);
        assert_eq!(state.effects.siege_multiplier(), dec!(0.5));
    }

    #[test]
    fn night_sortie_needs_guards_at_home() {
        let mut state = state();
        state.population.commit_crew(0, 6).unwrap();
        assert!(NightSortie.can_issue(&state).is_err());
    }

    #[test]
    fn address_backfires_under_tyranny() {
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        AddressTheCrowd.apply(&mut state, &mut report);
        assert_eq!(state.stats.morale(), 66);
        assert_eq!(state.stats.unrest(), 9);

        state.flags.adjust(FlagPath::Tyranny, 5);
        AddressTheCrowd.apply(&mut state, &mut report);
        assert_eq!(state.stats.unrest(), 13);
        assert_eq!(state.stats.morale(), 66);
    }

    #[test]
    fn burn_the_dead_dents_faith_for_a_while() {
        let mut state = state();
        state.flags.adjust(FlagPath::Faith, 3);
        let mut report = DayResolutionReport::new(1);
        BurnTheDead.apply(&mut state, &mut report);
        assert_eq!(state.stats.sickness(), 2);
        assert_eq!(state.flags.get(FlagPath::Faith), 2);
        for _ in 0..4 {
            state.flags.tick();
        }
        assert_eq!(state.flags.get(FlagPath::Faith), 3);
    }

    #[test]
    fn requisition_needs_martial_law() {
        let mut state = state();
        assert!(Requisition.can_issue(&state).is_err());
        state.flags.reach(Milestone::MartialState);
        assert!(Requisition.can_issue(&state).is_ok());
        let mut report = DayResolutionReport::new(1);
        Requisition.apply(&mut state, &mut report);
        assert_eq!(state.resources.get(ResourceKind::Food), 330);
        assert_eq!(state.resources.get(ResourceKind::Water), 320);
        assert_eq!(state.flags.get(FlagPath::Tyranny), 1);
    }
}
