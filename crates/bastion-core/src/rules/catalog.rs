//! Fixed-order registries of every rule in the game.
//!
//! Registration order is significant: active laws apply their daily
//! effects in catalog order, and events are evaluated in catalog order
//! (which fixes the order of their chance rolls).

use std::collections::BTreeSet;

use super::events::{
    Desertion, EnvoyOfTerms, FeverOutbreak, FoodRiot, NightRaid, OpeningBombardment, PreachersSermon,
    RefugeesAtGate, Sappers, SupplyCache, WellContamination,
};
use super::laws::{
    Conscription, Curfew, ForcedLabour, FortificationWorks, MartialLaw, PublicExecutions, QuarantineDistrict,
    SacredGardens, StrictRationing, TempleMandate, TriageProtocol,
};
use super::missions::{ForageBeyondWalls, NightWaterRun, SabotageEngines, ScoutTunnels, SeekAllies, SmuggleMedicine};
use super::orders::{
    AddressTheCrowd, BurnOuterFields, BurnTheDead, DoubleRations, EmergencyRepairs, MedicineDrive, NightSortie,
    Requisition, SealTheGranaries,
};
use super::{EmergencyOrder, Law, Mission, TriggeredEvent};

/// Errors detected while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two rules of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Rule kind.
        kind: &'static str,
        /// The repeated id.
        id: &'static str,
    },

    /// A mission's outcome weights do not add up to 100.
    #[error("mission {mission} bands sum to {total}, expected 100")]
    BandsDontSum {
        /// The mission.
        mission: &'static str,
        /// Actual total.
        total: u32,
    },

    /// A respondable event's default is not on its menu, or a menu has no
    /// default.
    #[error("event {event} has no valid default response")]
    MissingDefaultResponse {
        /// The event.
        event: &'static str,
    },
}

/// Every law, order, mission, and event, in registration order.
pub struct Catalog {
    laws: Vec<Box<dyn Law>>,
    orders: Vec<Box<dyn EmergencyOrder>>,
    missions: Vec<Box<dyn Mission>>,
    events: Vec<Box<dyn TriggeredEvent>>,
}

impl core::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalog")
            .field("laws", &self.laws.iter().map(|law| law.id()).collect::<Vec<_>>())
            .field("orders", &self.orders.iter().map(|order| order.id()).collect::<Vec<_>>())
            .field("missions", &self.missions.iter().map(|mission| mission.id()).collect::<Vec<_>>())
            .field("events", &self.events.iter().map(|event| event.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl Catalog {
    /// Assemble and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids, mission bands not summing
    /// to 100, or a respondable event without a valid default response.
    pub fn new(
        laws: Vec<Box<dyn Law>>,
        orders: Vec<Box<dyn EmergencyOrder>>,
        missions: Vec<Box<dyn Mission>>,
        events: Vec<Box<dyn TriggeredEvent>>,
    ) -> Result<Self, CatalogError> {
        unique("law", laws.iter().map(|law| law.id()))?;
        unique("order", orders.iter().map(|order| order.id()))?;
        unique("mission", missions.iter().map(|mission| mission.id()))?;
        unique("event", events.iter().map(|event| event.id()))?;

        for mission in &missions {
            let total = mission
                .bands()
                .iter()
                .fold(0_u32, |acc, band| acc.saturating_add(band.weight));
            if total != 100 {
                return Err(CatalogError::BandsDontSum {
                    mission: mission.id(),
                    total,
                });
            }
        }

        for event in &events {
            let menu = event.responses();
            if menu.is_empty() {
                continue;
            }
            let valid = event
                .default_response()
                .is_some_and(|default| menu.contains(&default));
            if !valid {
                return Err(CatalogError::MissingDefaultResponse { event: event.id() });
            }
        }

        Ok(Self {
            laws,
            orders,
            missions,
            events,
        })
    }

    /// The standard rule set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only if the built-in tables are malformed.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(
            vec![
                Box::new(StrictRationing),
                Box::new(Conscription),
                Box::new(Curfew),
                Box::new(MartialLaw),
                Box::new(PublicExecutions),
                Box::new(TempleMandate),
                Box::new(SacredGardens),
                Box::new(QuarantineDistrict),
                Box::new(ForcedLabour),
                Box::new(FortificationWorks),
                Box::new(TriageProtocol),
            ],
            vec![
                Box::new(DoubleRations),
                Box::new(BurnOuterFields),
                Box::new(EmergencyRepairs),
                Box::new(NightSortie),
                Box::new(MedicineDrive),
                Box::new(AddressTheCrowd),
                Box::new(BurnTheDead),
                Box::new(SealTheGranaries),
                Box::new(Requisition),
            ],
            vec![
                Box::new(ForageBeyondWalls),
                Box::new(NightWaterRun),
                Box::new(SabotageEngines),
                Box::new(SmuggleMedicine),
                Box::new(ScoutTunnels),
                Box::new(SeekAllies),
            ],
            vec![
                Box::new(OpeningBombardment),
                Box::new(FeverOutbreak),
                Box::new(Desertion),
                Box::new(FoodRiot),
                Box::new(WellContamination),
                Box::new(Sappers),
                Box::new(RefugeesAtGate),
                Box::new(PreachersSermon),
                Box::new(SupplyCache),
                Box::new(NightRaid),
                Box::new(EnvoyOfTerms),
            ],
        )
    }

    /// Laws in registration order.
    pub fn laws(&self) -> &[Box<dyn Law>] {
        &self.laws
    }

    /// Orders in registration order.
    pub fn orders(&self) -> &[Box<dyn EmergencyOrder>] {
        &self.orders
    }

    /// Missions in registration order.
    pub fn missions(&self) -> &[Box<dyn Mission>] {
        &self.missions
    }

    /// Events in registration order.
    pub fn events(&self) -> &[Box<dyn TriggeredEvent>] {
        &self.events
    }

    /// Look up a law.
    pub fn law(&self, id: &str) -> Option<&dyn Law> {
        self.laws.iter().find(|law| law.id() == id).map(Box::as_ref)
    }

    /// Look up an order.
    pub fn order(&self, id: &str) -> Option<&dyn EmergencyOrder> {
        self.orders.iter().find(|order| order.id() == id).map(Box::as_ref)
    }

    /// Look up a mission.
    pub fn mission(&self, id: &str) -> Option<&dyn Mission> {
        self.missions.iter().find(|mission| mission.id() == id).map(Box::as_ref)
    }

    /// Look up an event.
    pub fn event(&self, id: &str) -> Option<&dyn TriggeredEvent> {
        self.events.iter().find(|event| event.id() == id).map(Box::as_ref)
    }
}

fn unique(kind: &'static str, ids: impl Iterator<Item = &'static str>) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_types::DayResolutionReport;

    use super::*;
    use crate::rules::{Crew, OutcomeBand, Trigger};
    use crate::state::GameState;

    struct Lopsided;

    impl Mission for Lopsided {
        fn id(&self) -> &'static str {
            "lopsided"
        }

        fn name(&self) -> &'static str {
            "Lopsided"
        }

        fn summary(&self, _state: &GameState) -> String {
            String::new()
        }

        fn crew(&self) -> Crew {
            Crew::workers(1)
        }

        fn duration_days(&self) -> u32 {
            1
        }

        fn cooldown_days(&self) -> u32 {
            1
        }

        fn bands(&self) -> &'static [OutcomeBand] {
            &[OutcomeBand { key: "only", weight: 90 }]
        }

        fn apply_outcome(&self, _key: &str, _state: &mut GameState, _report: &mut DayResolutionReport) -> Crew {
            Crew::default()
        }
    }

    struct NoDefault;

    impl TriggeredEvent for NoDefault {
        fn id(&self) -> &'static str {
            "no_default"
        }

        fn name(&self) -> &'static str {
            "No Default"
        }

        fn trigger(&self, _state: &GameState) -> Trigger {
            Trigger::Never
        }

        fn responses(&self) -> &'static [&'static str] {
            &["yes", "no"]
        }

        fn default_response(&self) -> Option<&'static str> {
            Some("maybe")
        }

        fn apply(&self, _state: &mut GameState, _report: &mut DayResolutionReport, _response: Option<&str>) {}
    }

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.laws().len(), 11);
        assert_eq!(catalog.orders().len(), 9);
        assert_eq!(catalog.missions().len(), 6);
        assert_eq!(catalog.events().len(), 11);
    }

    #[test]
    fn registration_order_is_preserved() {
        let catalog = Catalog::standard().unwrap();
        let laws: Vec<&str> = catalog.laws().iter().map(|law| law.id()).collect();
        assert_eq!(laws.first(), Some(&"strict_rationing"));
        assert_eq!(laws.last(), Some(&"triage_protocol"));
        let events: Vec<&str> = catalog.events().iter().map(|event| event.id()).collect();
        assert_eq!(events.first(), Some(&"opening_bombardment"));
        assert_eq!(events.last(), Some(&"envoy_of_terms"));
    }

    #[test]
    fn lookups_by_id() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.law("curfew").unwrap().name(), "Curfew");
        assert!(catalog.order("requisition").is_some());
        assert!(catalog.mission("seek_allies").is_some());
        assert!(catalog.event("food_riot").is_some());
        assert!(catalog.law("divine_right").is_none());
    }

    #[test]
    fn malformed_bands_fail_fast() {
        let result = Catalog::new(Vec::new(), Vec::new(), vec![Box::new(Lopsided)], Vec::new());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::BandsDontSum {
                mission: "lopsided",
                total: 90
            }
        );
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let result = Catalog::new(
            vec![Box::new(Curfew), Box::new(Curfew)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId { kind: "law", .. })));
    }

    #[test]
    fn default_response_must_be_on_the_menu() {
        let result = Catalog::new(Vec::new(), Vec::new(), Vec::new(), vec![Box::new(NoDefault)]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::MissingDefaultResponse { event: "no_default" }
        );
    }
}
