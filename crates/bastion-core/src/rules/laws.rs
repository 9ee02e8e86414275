//! Standing laws, in registration order.
//!
//! | Law | Requires | On enact | Daily |
//! |-----|----------|----------|-------|
//! | Strict Rationing | | unrest +5 | food need x0.8, morale -1 |
//! | Conscription | 20 free workers | 10 workers become guards, Tyranny +1 | unrest -1 |
//! | Curfew | Tyranny >= 1 | | unrest -2, production x0.95, morale -1 |
//! | Martial Law | 15 guards, unrest >= 40 | `MartialState`, Tyranny +2, Fear +2 | unrest -3, morale -2 |
//! | Public Executions | `MartialState` | unrest -15, morale -10, Fear +3 for 5 days | unrest -(Fear / 3) |
//! | Temple Mandate | Tyranny <= 3 | Faith +2, `SacredCovenant` | morale +1, production x0.97 |
//! | Sacred Gardens | Faith >= 2 | | farming x1.3 |
//! | Quarantine District | a zone to seal | seal the Upper Ward | sickness -2, morale -1 |
//! | Forced Labour | Tyranny >= 2 | | production x1.2, unrest +2, sickness +1 |
//! | Fortification Works | 30 materials | Fortification +1, `SiegeDoctrine` | repair x1.25 |
//! | Triage Protocol | | | clinic capacity +3, morale -1 |

use bastion_ledger::ResourceBundle;
use bastion_types::numeric::pct;
use bastion_types::{DayResolutionReport, FlagPath, JobKind, LogTag, Milestone, ResourceKind, StatKind, ZoneId};

use super::{Law, RuleRefusal, require};
use crate::state::GameState;

/// Cuts the food ration.
pub struct StrictRationing;

impl Law for StrictRationing {
    fn id(&self) -> &'static str {
        "strict_rationing"
    }

    fn name(&self) -> &'static str {
        "Strict Rationing"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Food need -20% every day; morale -1 daily. Unrest +5 on enactment.".to_owned()
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.shift(StatKind::Unrest, 5);
        report.log(LogTag::Law, "Rations are cut. The queues grow angry.");
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.effects.scale_need(ResourceKind::Food, pct(80));
        state.shift(StatKind::Morale, -1);
    }
}

/// Pressganges workers onto the walls.
pub struct Conscription;

impl Conscription {
    const MIN_WORKERS: u32 = 20;
    const DRAFTED: u32 = 10;
}

impl Law for Conscription {
    fn id(&self) -> &'static str {
        "conscription"
    }

    fn name(&self) -> &'static str {
        "Conscription"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Draft {} workers into the guard; Tyranny +1; unrest -1 daily. Requires {} free workers (have {}).",
            Self::DRAFTED,
            Self::MIN_WORKERS,
            state.population.available_workers()
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(
            state.population.available_workers() >= Self::MIN_WORKERS,
            format!("at least {} free workers", Self::MIN_WORKERS),
        )
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        let drafted = state.population.conscript(Self::DRAFTED);
        state.flags.adjust(FlagPath::Tyranny, 1);
        report.log(LogTag::Law, format!("{drafted} workers are handed spears."));
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.shift(StatKind::Unrest, -1);
    }
}

/// Clears the streets at night.
pub struct Curfew;

impl Law for Curfew {
    fn id(&self) -> &'static str {
        "curfew"
    }

    fn name(&self) -> &'static str {
        "Curfew"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Unrest -2, production -5%, morale -1 daily. Requires Tyranny >= 1 (now {}).",
            state.flags.get(FlagPath::Tyranny)
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.get(FlagPath::Tyranny) >= 1, "Tyranny >= 1")
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.shift(StatKind::Unrest, -2);
        state.effects.scale_production(pct(95));
        state.shift(StatKind::Morale, -1);
    }
}

/// Puts the guard in charge.
pub struct MartialLaw;

impl MartialLaw {
    const MIN_GUARDS: u32 = 15;
    const MIN_UNREST: u32 = 40;
}

impl Law for MartialLaw {
    fn id(&self) -> &'static str {
        "martial_law"
    }

    fn name(&self) -> &'static str {
        "Martial Law"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Unrest -3, morale -2 daily; Tyranny +2, Fear +2. Requires {} guards (have {}) and unrest >= {} (now {}).",
            Self::MIN_GUARDS,
            state.population.guards_at_home(),
            Self::MIN_UNREST,
            state.stats.unrest()
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(
            state.population.guards_at_home() >= Self::MIN_GUARDS,
            format!("{} guards on the walls", Self::MIN_GUARDS),
        )?;
        require(
            state.stats.unrest() >= Self::MIN_UNREST,
            format!("unrest >= {}", Self::MIN_UNREST),
        )
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.flags.reach(Milestone::MartialState);
        state.flags.adjust(FlagPath::Tyranny, 2);
        state.flags.adjust(FlagPath::FearLevel, 2);
        report.log(LogTag::Law, "The guard captain now rules the streets.");
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.shift(StatKind::Unrest, -3);
        state.shift(StatKind::Morale, -2);
    }
}

/// Makes examples of agitators.
pub struct PublicExecutions;

impl Law for PublicExecutions {
    fn id(&self) -> &'static str {
        "public_executions"
    }

    fn name(&self) -> &'static str {
        "Public Executions"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Unrest -15, morale -10, Fear +3 for 5 days; then unrest -(Fear / 3) daily (now -{}). Requires martial law.",
            state.flags.get(FlagPath::FearLevel).div_euclid(3)
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.has(Milestone::MartialState), "martial law")
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.shift(StatKind::Unrest, -15);
        state.shift(StatKind::Morale, -10);
        state.flags.add_temporary(FlagPath::FearLevel, 3, 5);
        report.log(LogTag::Law, "Gallows go up in the market square.");
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        let fear = state.flags.get(FlagPath::FearLevel).div_euclid(3);
        state.shift(StatKind::Unrest, fear.saturating_neg());
    }
}

/// Hands daily life to the temple.
pub struct TempleMandate;

impl Law for TempleMandate {
    fn id(&self) -> &'static str {
        "temple_mandate"
    }

    fn name(&self) -> &'static str {
        "Temple Mandate"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Faith +2; morale +1, production -3% daily. Requires Tyranny <= 3 (now {}).",
            state.flags.get(FlagPath::Tyranny)
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.get(FlagPath::Tyranny) <= 3, "Tyranny <= 3")
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.flags.adjust(FlagPath::Faith, 2);
        state.flags.reach(Milestone::SacredCovenant);
        report.log(LogTag::Law, "The bells ring for the covenant.");
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.shift(StatKind::Morale, 1);
        state.effects.scale_production(pct(97));
    }
}

/// Plants blessed crops in every yard.
pub struct SacredGardens;

impl Law for SacredGardens {
    fn id(&self) -> &'static str {
        "sacred_gardens"
    }

    fn name(&self) -> &'static str {
        "Sacred Gardens"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Farming +30% daily. Requires Faith >= 2 (now {}).",
            state.flags.get(FlagPath::Faith)
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.get(FlagPath::Faith) >= 2, "Faith >= 2")
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.effects.scale_job(JobKind::Farming, pct(130));
    }
}

/// Seals one district off from the rest.
pub struct QuarantineDistrict;

impl QuarantineDistrict {
    fn target(state: &GameState) -> Option<ZoneId> {
        if state.perimeter.is_standing(ZoneId::UpperWard) {
            Some(ZoneId::UpperWard)
        } else {
            state.perimeter.innermost_standing_outside_keep()
        }
    }
}

impl Law for QuarantineDistrict {
    fn id(&self) -> &'static str {
        "quarantine_district"
    }

    fn name(&self) -> &'static str {
        "Quarantine District"
    }

    fn summary(&self, state: &GameState) -> String {
        match Self::target(state) {
            Some(zone) => format!("Seal the {zone}; sickness -2, morale -1 daily."),
            None => "No district left to seal.".to_owned(),
        }
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(Self::target(state).is_some(), "a standing district outside the Keep")
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        if let Some(zone) = Self::target(state) {
            state.perimeter.quarantine(zone);
            report.log(LogTag::Law, format!("The {zone} is sealed."));
        }
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.shift(StatKind::Sickness, -2);
        state.shift(StatKind::Morale, -1);
    }
}

/// Longer shifts under the lash.
pub struct ForcedLabour;

impl Law for ForcedLabour {
    fn id(&self) -> &'static str {
        "forced_labour"
    }

    fn name(&self) -> &'static str {
        "Forced Labour"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Production +20%, unrest +2, sickness +1 daily. Requires Tyranny >= 2 (now {}).",
            state.flags.get(FlagPath::Tyranny)
        )
    }

    fn can_enact(&self, state: &GameState) -> Result<(), RuleRefusal> {
        require(state.flags.get(FlagPath::Tyranny) >= 2, "Tyranny >= 2")
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.effects.scale_production(pct(120));
        state.shift(StatKind::Unrest, 2);
        state.shift(StatKind::Sickness, 1);
    }
}

/// Permanent works on the walls.
pub struct FortificationWorks;

impl FortificationWorks {
    const MATERIALS: u32 = 30;
}

impl Law for FortificationWorks {
    fn id(&self) -> &'static str {
        "fortification_works"
    }

    fn name(&self) -> &'static str {
        "Fortification Works"
    }

    fn summary(&self, state: &GameState) -> String {
        format!(
            "Costs {} materials (have {}). Fortification +1; repairs +25% daily.",
            Self::MATERIALS,
            state.resources.get(ResourceKind::Materials)
        )
    }

    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new().with(ResourceKind::Materials, Self::MATERIALS)
    }

    fn on_enact(&self, state: &mut GameState, report: &mut DayResolutionReport) {
        state.flags.adjust(FlagPath::Fortification, 1);
        state.flags.reach(Milestone::SiegeDoctrine);
        report.log(LogTag::Law, "Masons begin thickening the walls.");
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.effects.scale_job(JobKind::Repair, pct(125));
    }
}

/// Treat the saveable first.
pub struct TriageProtocol;

impl Law for TriageProtocol {
    fn id(&self) -> &'static str {
        "triage_protocol"
    }

    fn name(&self) -> &'static str {
        "Triage Protocol"
    }

    fn summary(&self, _state: &GameState) -> String {
        "Clinic capacity +3, morale -1 daily.".to_owned()
    }

    fn apply_daily(&self, state: &mut GameState, _report: &mut DayResolutionReport) {
        state.effects.add_clinic_capacity(3);
        state.shift(StatKind::Morale, -1);
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
    fn conscription_drafts_and_raises_tyranny() {
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        assert!(Conscription.can_enact(&state).is_ok());
        Conscription.on_enact(&mut state, &mut report);
        assert_eq!(state.population.guards(), 25);
        assert_eq!(state.population.available_workers(), 60);
        assert_eq!(state.flags.get(FlagPath::Tyranny), 1);
    }

    #[test]
    fn conscription_needs_workers() {
        let mut state = state();
        state.population.kill_healthy(55);
        assert!(matches!(
            Conscription.can_enact(&state),
            Err(RuleRefusal::Requirement(_))
        ));
    }

    #[test]
    fn curfew_needs_tyranny() {
        let mut state = state();
        assert!(Curfew.can_enact(&state).is_err());
        state.flags.adjust(FlagPath::Tyranny, 1);
        assert!(Curfew.can_enact(&state).is_ok());
    }

    #[test]
    fn martial_law_needs_guards_and_unrest() {
        let mut state = state();
        assert!(MartialLaw.can_enact(&state).is_err());
        state.stats.set(StatKind::Unrest, 45);
        assert!(MartialLaw.can_enact(&state).is_ok());
        let mut report = DayResolutionReport::new(1);
        MartialLaw.on_enact(&mut state, &mut report);
        assert!(state.flags.has(Milestone::MartialState));
        assert_eq!(state.flags.get(FlagPath::Tyranny), 2);
        assert_eq!(state.flags.get(FlagPath::FearLevel), 2);
    }

    #[test]
    fn executions_scale_with_fear() {
        let mut state = state();
        assert!(PublicExecutions.can_enact(&state).is_err());
        state.flags.reach(Milestone::MartialState);
        state.flags.adjust(FlagPath::FearLevel, 2);
        state.stats.set(StatKind::Unrest, 60);
        let mut report = DayResolutionReport::new(1);
        PublicExecutions.on_enact(&mut state, &mut report);
        assert_eq!(state.stats.unrest(), 45);
        assert_eq!(state.stats.morale(), 50);
        assert_eq!(state.flags.get(FlagPath::FearLevel), 5);
        PublicExecutions.apply_daily(&mut state, &mut report);
        assert_eq!(state.stats.unrest(), 44);
    }

    #[test]
    fn sacred_gardens_boost_farming_only() {
        let mut state = state();
        state.flags.adjust(FlagPath::Faith, 2);
        assert!(SacredGardens.can_enact(&state).is_ok());
        let mut report = DayResolutionReport::new(1);
        SacredGardens.apply_daily(&mut state, &mut report);
        assert_eq!(state.effects.job_multiplier(JobKind::Farming), dec!(1.3));
        assert_eq!(state.effects.job_multiplier(JobKind::Salvage), dec!(1));
    }

    #[test]
    fn quarantine_falls_back_when_upper_ward_is_gone() {
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        QuarantineDistrict.on_enact(&mut state, &mut report);
        assert!(state.perimeter.zone(ZoneId::UpperWard).unwrap().quarantined);

        let mut state = self::state();
        state.perimeter.damage_zone(ZoneId::UpperWard, 100);
        QuarantineDistrict.on_enact(&mut state, &mut report);
        assert!(state.perimeter.zone(ZoneId::LowerWard).unwrap().quarantined);
    }

    #[test]
    fn fortification_works_has_a_cost() {
        assert_eq!(
            FortificationWorks.cost().amount(ResourceKind::Materials),
            30
        );
        let mut state = state();
        let mut report = DayResolutionReport::new(1);
        FortificationWorks.on_enact(&mut state, &mut report);
        FortificationWorks.apply_daily(&mut state, &mut report);
        assert_eq!(state.flags.get(FlagPath::Fortification), 1);
        assert!(state.flags.has(Milestone::SiegeDoctrine));
        assert_eq!(state.effects.job_multiplier(JobKind::Repair), dec!(1.25));
    }

    #[test]
    fn summaries_reflect_state() {
        let mut state = state();
        state.flags.adjust(FlagPath::Faith, 1);
        assert!(SacredGardens.summary(&state).contains("now 1"));
    }
}
