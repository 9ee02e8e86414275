//! Triggered events, in registration order.
//!
//! Triggers are pure and never roll dice; a [`Trigger::Chance`] is rolled
//! by the engine. Walls an event knocks down are noticed by the engine
//! after the stage, which applies the zone-loss penalties.

use bastion_types::numeric::{floor_u32, pct, scale};
use bastion_types::{DayResolutionReport, FlagPath, LogTag, ResourceKind, StatKind, ZoneId};

use super::{Trigger, TriggeredEvent};
use crate::state::GameState;

/// Remove a share of the current stock of `resource`, rounded down.
fn lose_share(state: &mut GameState, resource: ResourceKind, percent: u32, reason: &str) -> u32 {
    let amount = floor_u32(scale(state.resources.get(resource), pct(percent)));
    state.resources.debit(resource, amount, reason)
}

/// The enemy announces itself.
pub struct OpeningBombardment;

impl TriggeredEvent for OpeningBombardment {
    fn id(&self) -> &'static str {
        "opening_bombardment"
    }

    fn name(&self) -> &'static str {
        "Opening Bombardment"
    }

    fn once(&self) -> bool {
        true
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.day == 1 { Trigger::Always } else { Trigger::Never }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        state.perimeter.damage_zone(ZoneId::OuterFarms, 10);
        let burned = state.resources.debit(ResourceKind::Food, 10, self.id());
        report.log(
            LogTag::Event,
            format!("Fire arrows rain on the Outer Farms; {burned} food burns in the fields."),
        );
    }
}

/// Fever in the crowded wards.
pub struct FeverOutbreak;

impl FeverOutbreak {
    const PLAGUE_DAYS: u32 = 5;
}

impl TriggeredEvent for FeverOutbreak {
    fn id(&self) -> &'static str {
        "fever_outbreak"
    }

    fn name(&self) -> &'static str {
        "Fever Outbreak"
    }

    fn cooldown_days(&self) -> u32 {
        10
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.stats.sickness() >= 40 {
            Trigger::Chance(15)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        state.tracking.plague_days = state.tracking.plague_days.max(Self::PLAGUE_DAYS);
        state.shift(StatKind::Sickness, 5);
        report.log(LogTag::Event, "A fever spreads from house to house.");
    }
}

/// Guards slip over the wall at night.
pub struct Desertion;

impl TriggeredEvent for Desertion {
    fn id(&self) -> &'static str {
        "desertion"
    }

    fn name(&self) -> &'static str {
        "Desertion"
    }

    fn cooldown_days(&self) -> u32 {
        4
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.stats.morale() < 30 && state.population.guards_at_home() >= 4 {
            Trigger::Chance(25)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        let count = state.population.guards_at_home().div_euclid(10).max(1);
        let gone = state.population.desert(count);
        state.shift(StatKind::Unrest, 3);
        report.log(LogTag::Event, format!("{gone} guards desert in the night."));
    }
}

/// Hungry crowds storm the stores.
pub struct FoodRiot;

impl TriggeredEvent for FoodRiot {
    fn id(&self) -> &'static str {
        "food_riot"
    }

    fn name(&self) -> &'static str {
        "Food Riot"
    }

    fn cooldown_days(&self) -> u32 {
        3
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.tracking.in_deficit(ResourceKind::Food) && state.stats.unrest() >= 50 {
            Trigger::Always
        } else {
            Trigger::Never
        }
    }

    fn responses(&self) -> &'static [&'static str] {
        &["crackdown", "distribute", "ignore"]
    }

    fn default_response(&self) -> Option<&'static str> {
        Some("ignore")
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, response: Option<&str>) {
        match response {
            Some("crackdown") => {
                state.shift(StatKind::Unrest, -8);
                state.flags.adjust(FlagPath::Tyranny, 1);
                let dead = state.population.kill_healthy(2);
                state.record_deaths(report, dead);
                report.log(LogTag::Event, format!("The guard breaks the riot; {dead} rioters die."));
            }
            Some("distribute") => {
                let handed = state.resources.debit(ResourceKind::Food, 10, self.id());
                state.shift(StatKind::Unrest, -5);
                report.log(LogTag::Event, format!("{handed} food is handed to the crowd."));
            }
            _ => {
                let looted = lose_share(state, ResourceKind::Food, 15, self.id());
                state.shift(StatKind::Unrest, 5);
                state.shift(StatKind::Morale, -5);
                report.log(LogTag::Event, format!("Rioters loot {looted} food."));
            }
        }
    }
}

/// Something foul in the cisterns.
pub struct WellContamination;

impl TriggeredEvent for WellContamination {
    fn id(&self) -> &'static str {
        "well_contamination"
    }

    fn name(&self) -> &'static str {
        "Well Contamination"
    }

    fn cooldown_days(&self) -> u32 {
        8
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.resources.get(ResourceKind::Water) > 0 {
            Trigger::Chance(6)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        let spoiled = lose_share(state, ResourceKind::Water, 25, self.id());
        state.shift(StatKind::Sickness, 5);
        report.log(LogTag::Event, format!("A cistern is fouled; {spoiled} water is poured away."));
    }
}

/// Miners under the walls.
pub struct Sappers;

impl TriggeredEvent for Sappers {
    fn id(&self) -> &'static str {
        "sappers"
    }

    fn name(&self) -> &'static str {
        "Sappers"
    }

    fn cooldown_days(&self) -> u32 {
        6
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.day >= 10 {
            Trigger::Chance(10)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        let damage = if state.flags.get(FlagPath::Fortification) >= 3 { 5 } else { 15 };
        match state.perimeter.damage_active(damage) {
            Some(hit) => report.log(
                LogTag::Event,
                format!("Sappers collapse a section of the {}: -{} integrity.", hit.zone, hit.dealt),
            ),
            None => report.log(LogTag::Event, "Sappers dig, but there is nothing left to bring down."),
        }
    }
}

/// Families from the countryside beg to be let in.
pub struct RefugeesAtGate;

impl TriggeredEvent for RefugeesAtGate {
    fn id(&self) -> &'static str {
        "refugees_at_gate"
    }

    fn name(&self) -> &'static str {
        "Refugees at the Gate"
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if matches!(state.day, 8 | 19) {
            Trigger::Always
        } else {
            Trigger::Never
        }
    }

    fn responses(&self) -> &'static [&'static str] {
        &["admit", "turn_away"]
    }

    fn default_response(&self) -> Option<&'static str> {
        Some("admit")
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, response: Option<&str>) {
        if response == Some("turn_away") {
            state.shift(StatKind::Morale, -6);
            state.flags.adjust(FlagPath::Tyranny, 1);
            report.log(LogTag::Event, "The gate stays shut; the refugees' cries carry all night.");
        } else {
            state.population.admit(6, 8);
            state.shift(StatKind::Morale, 3);
            report.log(LogTag::Event, "Six workers and eight elders are let in.");
        }
    }
}

/// A rousing sermon in the square.
pub struct PreachersSermon;

impl TriggeredEvent for PreachersSermon {
    fn id(&self) -> &'static str {
        "preachers_sermon"
    }

    fn name(&self) -> &'static str {
        "Preacher's Sermon"
    }

    fn cooldown_days(&self) -> u32 {
        5
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.flags.get(FlagPath::Faith) >= 3 {
            Trigger::Chance(20)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        state.shift(StatKind::Morale, 5);
        state.shift(StatKind::Unrest, -3);
        report.log(LogTag::Event, "The preacher's words steady the city.");
    }
}

/// A forgotten cellar turns up.
pub struct SupplyCache;

impl TriggeredEvent for SupplyCache {
    fn id(&self) -> &'static str {
        "supply_cache"
    }

    fn name(&self) -> &'static str {
        "Supply Cache"
    }

    fn cooldown_days(&self) -> u32 {
        10
    }

    fn trigger(&self, _state: &GameState) -> Trigger {
        Trigger::Chance(5)
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        state.resources.credit(ResourceKind::Materials, 20, self.id());
        state.resources.credit(ResourceKind::Fuel, 10, self.id());
        report.log(LogTag::Event, "Workers break into a sealed cellar full of supplies.");
    }
}

/// Raiders over a thinly held wall.
pub struct NightRaid;

impl TriggeredEvent for NightRaid {
    fn id(&self) -> &'static str {
        "night_raid"
    }

    fn name(&self) -> &'static str {
        "Night Raid"
    }

    fn cooldown_days(&self) -> u32 {
        5
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.siege.intensity >= 3 && state.population.guards_at_home() < 10 {
            Trigger::Chance(20)
        } else {
            Trigger::Never
        }
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, _response: Option<&str>) {
        let food = state.resources.debit(ResourceKind::Food, 20, self.id());
        let materials = state.resources.debit(ResourceKind::Materials, 10, self.id());
        let dead = state.population.kill_guards(2);
        state.record_deaths(report, dead);
        report.log(
            LogTag::Event,
            format!("Raiders carry off {food} food and {materials} materials; {dead} guards are killed."),
        );
    }
}

/// The besiegers offer terms.
pub struct EnvoyOfTerms;

impl TriggeredEvent for EnvoyOfTerms {
    fn id(&self) -> &'static str {
        "envoy_of_terms"
    }

    fn name(&self) -> &'static str {
        "Envoy of Terms"
    }

    fn once(&self) -> bool {
        true
    }

    fn trigger(&self, state: &GameState) -> Trigger {
        if state.day == 20 { Trigger::Always } else { Trigger::Never }
    }

    fn responses(&self) -> &'static [&'static str] {
        &["refuse", "parley"]
    }

    fn default_response(&self) -> Option<&'static str> {
        Some("refuse")
    }

    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, response: Option<&str>) {
        if response == Some("parley") {
            state.siege.add_delay(2);
            state.shift(StatKind::Morale, -3);
            report.log(LogTag::Event, "Talks drag on; the guns fall quiet for a while.");
        } else {
            state.shift(StatKind::Morale, 5);
            state.flags.add_temporary(FlagPath::FearLevel, 1, 3);
            report.log(LogTag::Event, "The envoy is sent back empty-handed.");
        }
    }
}
