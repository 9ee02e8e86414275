//! Missions beyond the walls, in registration order.
//!
//! The crew leaves on the day of dispatch and is counted down from the
//! next day. On return the engine rolls once against the band table and
//! hands the winning key to [`Mission::apply_outcome`].

use bastion_types::{DayResolutionReport, LogTag, ResourceKind, StatKind};

use super::{Crew, Mission, OutcomeBand};
use crate::state::GameState;

/// Scavenge the abandoned farmsteads.
pub struct ForageBeyondWalls;

impl Mission for ForageBeyondWalls {
    fn id(&self) -> &'static str {
        "forage_beyond_walls"
    }

    fn name(&self) -> &'static str {
        "Forage Beyond the Walls"
    }

    fn summary(&self, _state: &GameState) -> String {
        "6 workers, 2 days. 40%: +40 food, +10 fuel. 30%: +15 food. 30%: ambushed, 2 die.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew::workers(6)
    }

    fn duration_days(&self) -> u32 {
        2
    }

    fn cooldown_days(&self) -> u32 {
        3
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "success", weight: 40 },
            OutcomeBand { key: "partial", weight: 30 },
            OutcomeBand { key: "ambush", weight: 30 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "success" => {
                state.resources.credit(ResourceKind::Food, 40, self.id());
                state.resources.credit(ResourceKind::Fuel, 10, self.id());
                report.log(LogTag::Mission, "The foragers return laden with grain and kindling.");
                Crew::default()
            }
            "partial" => {
                state.resources.credit(ResourceKind::Food, 15, self.id());
                report.log(LogTag::Mission, "The foragers bring back a few sacks.");
                Crew::default()
            }
            _ => {
                state.shift(StatKind::Morale, -4);
                report.log(LogTag::Mission, "The foragers were ambushed; two are lost.");
                Crew::workers(2)
            }
        }
    }
}

/// Fill barrels at the river under cover of dark.
pub struct NightWaterRun;

impl Mission for NightWaterRun {
    fn id(&self) -> &'static str {
        "night_water_run"
    }

    fn name(&self) -> &'static str {
        "Night Water Run"
    }

    fn summary(&self, _state: &GameState) -> String {
        "4 workers, 1 day. 50%: +50 water. 30%: +20 water. 20%: one is caught.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew::workers(4)
    }

    fn duration_days(&self) -> u32 {
        1
    }

    fn cooldown_days(&self) -> u32 {
        2
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "full", weight: 50 },
            OutcomeBand { key: "partial", weight: 30 },
            OutcomeBand { key: "caught", weight: 20 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "full" => {
                state.resources.credit(ResourceKind::Water, 50, self.id());
                report.log(LogTag::Mission, "Every barrel comes back full.");
                Crew::default()
            }
            "partial" => {
                state.resources.credit(ResourceKind::Water, 20, self.id());
                report.log(LogTag::Mission, "Patrols cut the water run short.");
                Crew::default()
            }
            _ => {
                state.shift(StatKind::Unrest, 2);
                report.log(LogTag::Mission, "A water carrier is caught at the river.");
                Crew::workers(1)
            }
        }
    }
}

/// Burn the enemy's siege engines.
pub struct SabotageEngines;

impl Mission for SabotageEngines {
    fn id(&self) -> &'static str {
        "sabotage_engines"
    }

    fn name(&self) -> &'static str {
        "Sabotage the Engines"
    }

    fn summary(&self, _state: &GameState) -> String {
        "5 guards, 3 days. 35%: delay 3, morale +6. 35%: delay 1. 30%: 3 guards die, morale -6.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew::guards(5)
    }

    fn duration_days(&self) -> u32 {
        3
    }

    fn cooldown_days(&self) -> u32 {
        6
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "success", weight: 35 },
            OutcomeBand { key: "partial", weight: 35 },
            OutcomeBand { key: "failure", weight: 30 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "success" => {
                state.siege.add_delay(3);
                state.shift(StatKind::Morale, 6);
                report.log(LogTag::Mission, "Flames rise from the enemy camp.");
                Crew::default()
            }
            "partial" => {
                state.siege.add_delay(1);
                report.log(LogTag::Mission, "One engine is damaged before the saboteurs withdraw.");
                Crew::default()
            }
            _ => {
                state.shift(StatKind::Morale, -6);
                report.log(LogTag::Mission, "The saboteurs are discovered; three guards fall.");
                Crew::guards(3)
            }
        }
    }
}

/// Buy remedies from the smugglers' boats.
pub struct SmuggleMedicine;

impl Mission for SmuggleMedicine {
    fn id(&self) -> &'static str {
        "smuggle_medicine"
    }

    fn name(&self) -> &'static str {
        "Smuggle Medicine"
    }

    fn summary(&self, _state: &GameState) -> String {
        "3 workers, 2 days. 45%: +20 medicine. 35%: +8 medicine. 20%: all lost.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew::workers(3)
    }

    fn duration_days(&self) -> u32 {
        2
    }

    fn cooldown_days(&self) -> u32 {
        4
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "success", weight: 45 },
            OutcomeBand { key: "partial", weight: 35 },
            OutcomeBand { key: "lost", weight: 20 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "success" => {
                state.resources.credit(ResourceKind::Medicine, 20, self.id());
                report.log(LogTag::Mission, "The smugglers deliver crates of tinctures.");
                Crew::default()
            }
            "partial" => {
                state.resources.credit(ResourceKind::Medicine, 8, self.id());
                report.log(LogTag::Mission, "Only a few vials made it through.");
                Crew::default()
            }
            _ => {
                report.log(LogTag::Mission, "The boat never came back.");
                self.crew()
            }
        }
    }
}

/// Explore the old tunnels under the city.
pub struct ScoutTunnels;

impl Mission for ScoutTunnels {
    fn id(&self) -> &'static str {
        "scout_tunnels"
    }

    fn name(&self) -> &'static str {
        "Scout the Tunnels"
    }

    fn summary(&self, _state: &GameState) -> String {
        "3 workers, 2 days. 60%: +25 materials. 25%: +10 materials. 15%: collapse, 2 die, sickness +3.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew::workers(3)
    }

    fn duration_days(&self) -> u32 {
        2
    }

    fn cooldown_days(&self) -> u32 {
        3
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "cache", weight: 60 },
            OutcomeBand { key: "scraps", weight: 25 },
            OutcomeBand { key: "collapse", weight: 15 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "cache" => {
                state.resources.credit(ResourceKind::Materials, 25, self.id());
                report.log(LogTag::Mission, "The scouts find a forgotten store of timber and iron.");
                Crew::default()
            }
            "scraps" => {
                state.resources.credit(ResourceKind::Materials, 10, self.id());
                report.log(LogTag::Mission, "The tunnels yield a little salvage.");
                Crew::default()
            }
            _ => {
                state.shift(StatKind::Sickness, 3);
                report.log(LogTag::Mission, "A tunnel collapses; two scouts are buried.");
                Crew::workers(2)
            }
        }
    }
}

/// Ride for help.
pub struct SeekAllies;

impl Mission for SeekAllies {
    fn id(&self) -> &'static str {
        "seek_allies"
    }

    fn name(&self) -> &'static str {
        "Seek Allies"
    }

    fn summary(&self, _state: &GameState) -> String {
        "2 workers and 2 guards, 4 days. 30%: a relief convoy. 40%: nothing. 30%: the envoys are lost.".to_owned()
    }

    fn crew(&self) -> Crew {
        Crew { workers: 2, guards: 2 }
    }

    fn duration_days(&self) -> u32 {
        4
    }

    fn cooldown_days(&self) -> u32 {
        10
    }

    fn bands(&self) -> &'static [OutcomeBand] {
        const BANDS: [OutcomeBand; 3] = [
            OutcomeBand { key: "relief", weight: 30 },
            OutcomeBand { key: "refused", weight: 40 },
            OutcomeBand { key: "lost", weight: 30 },
        ];
        &BANDS
    }

    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew {
        match key {
            "relief" => {
                state.resources.credit(ResourceKind::Food, 60, self.id());
                state.resources.credit(ResourceKind::Water, 40, self.id());
                state.shift(StatKind::Morale, 10);
                state.siege.add_delay(2);
                report.log(LogTag::Mission, "A relief convoy slips through the lines.");
                Crew::default()
            }
            "refused" => {
                report.log(LogTag::Mission, "The neighbours will not risk it.");
                Crew::default()
            }
            _ => {
                state.shift(StatKind::Morale, -8);
                report.log(LogTag::Mission, "The envoys' heads are catapulted over the wall.");
                self.crew()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn state() -> GameState {
        GameState::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn every_table_sums_to_one_hundred() {
        let missions: [&dyn Mission; 6] = [
            &ForageBeyondWalls,
            &NightWaterRun,
            &SabotageEngines,
            &SmuggleMedicine,
            &ScoutTunnels,
            &SeekAllies,
        ];
        for mission in missions {
            let total: u32 = mission.bands().iter().map(|band| band.weight).sum();
            assert_eq!(total, 100, "{}", mission.id());
        }
    }

    #[test]
    fn ambush_reports_casualties() {
        let mut state = state();
        let mut report = DayResolutionReport::new(3);
        let lost = ForageBeyondWalls.apply_outcome("ambush", &mut state, &mut report);
        assert_eq!(lost, Crew::workers(2));
        assert_eq!(state.stats.morale(), 56);
    }

    #[test]
    fn relief_convoy_restocks() {
        let mut state = state();
        let mut report = DayResolutionReport::new(5);
        let lost = SeekAllies.apply_outcome("relief", &mut state, &mut report);
        assert_eq!(lost, Crew::default());
        assert_eq!(state.resources.get(ResourceKind::Food), 360);
        assert_eq!(state.resources.get(ResourceKind::Water), 340);
        assert_eq!(state.siege.escalation_delay, 2);
    }

    #[test]
    fn lost_envoys_take_the_whole_crew() {
        let mut state = state();
        let mut report = DayResolutionReport::new(5);
        let lost = SeekAllies.apply_outcome("lost", &mut state, &mut report);
        assert_eq!(lost, SeekAllies.crew());
    }
}
