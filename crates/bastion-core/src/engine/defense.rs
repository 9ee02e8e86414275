//! Stages 9 and 10: the siege and the repair crews, plus zone-loss
//! bookkeeping shared by every stage that can bring a wall down.

use bastion_types::numeric::compound;
use bastion_types::{DayResolutionReport, FlagPath, LogTag, ResourceKind, StatKind, ZoneId};
use bastion_world::{Escalation, SiegePressure, fortification_multiplier, weather_siege_multiplier};
use tracing::{debug, info};

use super::{Engine, signed};
use crate::state::GameState;

impl Engine {
    /// Stage 9: escalation, then damage to the active perimeter.
    pub(super) fn apply_siege(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let config = &self.config.siege;
        let day = state.day;

        let pressure = SiegePressure {
            restless: state.stats.unrest() >= config.pressure_unrest,
            ailing: state.stats.sickness() >= config.pressure_sickness,
            food_deficit: state.tracking.in_deficit(ResourceKind::Food),
            water_deficit: state.tracking.in_deficit(ResourceKind::Water),
            crumbling: state.perimeter.lost_count() >= config.pressure_lost_zones,
        };
        match state
            .siege
            .advance(config, day, self.config.run.target_day, pressure)
        {
            Escalation::Holding => {}
            Escalation::Escalated {
                intensity,
                forced: true,
            } => report.log(
                LogTag::Siege,
                format!("Sensing weakness, the enemy presses early. Intensity {intensity}."),
            ),
            Escalation::Escalated {
                intensity,
                forced: false,
            } => report.log(LogTag::Siege, format!("The siege intensifies to {intensity}.")),
            Escalation::Delayed { remaining } => report.log(
                LogTag::Siege,
                format!("The enemy's escalation stalls ({remaining} delays left)."),
            ),
        }

        let Some(zone) = state.perimeter.active() else {
            return;
        };
        let fortification = u32::try_from(state.flags.get(FlagPath::Fortification)).unwrap_or(0);
        let multiplier = compound(
            state.effects.siege_multiplier(),
            fortification_multiplier(config, fortification),
        );
        let damage = state.siege.damage(
            config,
            zone.damage_factor,
            multiplier,
            weather_siege_multiplier(state.tracking.weather, &config.weather),
        );

        if let Some(hit) = state.perimeter.damage_active(damage) {
            report.siege_damage = hit.dealt;
            let left = state.perimeter.zone(hit.zone).map_or(0, |zone| zone.integrity());
            let assault = if state.siege.final_assault {
                "The final assault batters"
            } else {
                "Siege engines batter"
            };
            report.log(
                LogTag::Siege,
                format!("{assault} the {}: {} damage, {left} integrity left.", hit.zone, hit.dealt),
            );
            debug!(day, zone = %hit.zone, dealt = hit.dealt, left, "siege damage");
        }
    }

    /// Stage 10: the day's repair points heal the active perimeter.
    #[allow(clippy::unused_self)]
    pub(super) fn apply_repairs(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let points = core::mem::take(&mut state.tracking.pending_repair);
        if let Some((zone, restored)) = state.perimeter.repair_active(points)
            && restored > 0
        {
            report.log(LogTag::Repair, format!("Crews restore {restored} integrity to the {zone}."));
        }
    }

    /// Apply the one-time penalty for every zone that fell since the last
    /// check.
    pub(super) fn settle_zone_losses(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let fallen: Vec<ZoneId> = state
            .perimeter
            .zones()
            .iter()
            .filter(|zone| zone.is_lost() && !state.history.zones_lost.contains(&zone.id))
            .map(|zone| zone.id)
            .collect();

        let config = &self.config.siege;
        for zone in fallen {
            state.history.zones_lost.push(zone);
            report.zones_lost.push(zone);
            state.shift(StatKind::Morale, signed(config.zone_loss_morale).saturating_neg());
            state.shift(StatKind::Unrest, signed(config.zone_loss_unrest));
            report.log(LogTag::Siege, format!("The {zone} has fallen."));
            info!(day = state.day, %zone, "zone fell");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_world::MAX_INTEGRITY;

    use super::*;
    use crate::config::SimulationConfig;

    fn setup() -> (Engine, GameState) {
        let engine = Engine::standard(SimulationConfig::default()).unwrap();
        let state = engine.new_game().unwrap();
        (engine, state)
    }

    fn integrity(state: &GameState, zone: ZoneId) -> u32 {
        state.perimeter.zone(zone).unwrap().integrity()
    }

    #[test]
    fn siege_strikes_the_outermost_standing_zone() {
        let (engine, mut state) = setup();
        let before = integrity(&state, ZoneId::OuterFarms);
        let mut report = DayResolutionReport::new(1);
        engine.apply_siege(&mut state, &mut report);

        assert!(integrity(&state, ZoneId::OuterFarms) < before);
        assert_eq!(report.siege_damage, before.saturating_sub(integrity(&state, ZoneId::OuterFarms)));
        assert!(report.has_tag(LogTag::Siege));
    }

    #[test]
    fn fortification_softens_the_blow() {
        let (engine, mut plain) = setup();
        let (_, mut fortified) = setup();
        fortified.flags.adjust(FlagPath::Fortification, 5);

        let mut report = DayResolutionReport::new(1);
        engine.apply_siege(&mut plain, &mut report);
        engine.apply_siege(&mut fortified, &mut report);

        assert!(integrity(&fortified, ZoneId::OuterFarms) > integrity(&plain, ZoneId::OuterFarms));
    }

    #[test]
    fn repairs_are_capped_and_consumed() {
        let (engine, mut state) = setup();
        state.perimeter.damage_active(10);
        state.tracking.pending_repair = 500;
        let mut report = DayResolutionReport::new(1);
        engine.apply_repairs(&mut state, &mut report);

        assert_eq!(integrity(&state, ZoneId::OuterFarms), MAX_INTEGRITY);
        assert_eq!(state.tracking.pending_repair, 0);
        assert!(report.has_tag(LogTag::Repair));
    }

    #[test]
    fn lost_zone_is_penalised_once() {
        let (engine, mut state) = setup();
        let morale = state.stats.morale();
        state.perimeter.damage_zone(ZoneId::OuterFarms, MAX_INTEGRITY);

        let mut report = DayResolutionReport::new(1);
        engine.settle_zone_losses(&mut state, &mut report);
        engine.settle_zone_losses(&mut state, &mut report);

        assert_eq!(report.zones_lost, vec![ZoneId::OuterFarms]);
        assert_eq!(state.history.zones_lost, vec![ZoneId::OuterFarms]);
        let expected = morale.saturating_sub(engine.config().siege.zone_loss_morale);
        assert_eq!(state.stats.morale(), expected);
    }

    #[test]
    fn lost_zones_never_come_back() {
        let (engine, mut state) = setup();
        state.perimeter.damage_zone(ZoneId::OuterFarms, MAX_INTEGRITY);
        state.tracking.pending_repair = 50;
        let mut report = DayResolutionReport::new(1);
        engine.apply_repairs(&mut state, &mut report);

        assert!(state.perimeter.zone(ZoneId::OuterFarms).unwrap().is_lost());
        assert_eq!(state.perimeter.active_id(), Some(ZoneId::ArtisanQuarter));
    }
}
