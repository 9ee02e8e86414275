//! Player-facing rules: laws, emergency orders, missions, and triggered
//! events.
//!
//! Every rule is a flat unit struct implementing one small trait. The
//! traits split what a rule *allows* (pure checks over `&GameState`) from
//! what it *does* (mutations of `&mut GameState` narrated into the day
//! report). Rules never touch the RNG: chances are declared and the engine
//! rolls them.
//!
//! Fixed-order registries live in [`catalog`].

pub mod catalog;
pub mod events;
pub mod laws;
pub mod missions;
pub mod orders;

use bastion_ledger::{LedgerError, ResourceBundle};
use bastion_people::PeopleError;
use bastion_types::DayResolutionReport;

use crate::state::GameState;

pub use catalog::{Catalog, CatalogError};

/// Why a player action was refused. Refusals are logged and the day goes
/// on; they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleRefusal {
    /// No rule with that id exists.
    #[error("no {kind} named {id}")]
    Unknown {
        /// Rule kind ("law", "order", "mission").
        kind: &'static str,
        /// The id that was asked for.
        id: String,
    },

    /// The law is already in force, or the mission already under way.
    #[error("already active")]
    AlreadyActive,

    /// The rule was used too recently.
    #[error("on cooldown until day {ready_on}")]
    OnCooldown {
        /// First day the rule may be used again.
        ready_on: u32,
    },

    /// A one-use order was already spent.
    #[error("already used")]
    Spent,

    /// A precondition over the state does not hold.
    #[error("requires {0}")]
    Requirement(String),

    /// The cost cannot be paid.
    #[error("cannot pay: {source}")]
    Unaffordable {
        /// The ledger's complaint.
        #[from]
        source: LedgerError,
    },

    /// Not enough free people for the crew.
    #[error("crew unavailable: {source}")]
    Crew {
        /// The population's complaint.
        #[from]
        source: PeopleError,
    },
}

/// Shorthand for a failed precondition.
pub fn require(condition: bool, what: impl Into<String>) -> Result<(), RuleRefusal> {
    if condition {
        Ok(())
    } else {
        Err(RuleRefusal::Requirement(what.into()))
    }
}

/// A standing law. Once enacted it stays in force for the rest of the run.
pub trait Law {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Tooltip text, which may depend on the current state.
    fn summary(&self, state: &GameState) -> String;

    /// One-off cost paid on enactment.
    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new()
    }

    /// Whether the law may be enacted now.
    fn can_enact(&self, _state: &GameState) -> Result<(), RuleRefusal> {
        Ok(())
    }

    /// One-off effects on the day of enactment.
    fn on_enact(&self, _state: &mut GameState, _report: &mut DayResolutionReport) {}

    /// Effects applied every day the law is in force, including the first.
    fn apply_daily(&self, state: &mut GameState, report: &mut DayResolutionReport);
}

/// How often an emergency order may be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    /// Days that must pass between issues.
    Days(u32),
    /// Only ever once per run.
    Once,
}

/// A single-day emergency measure.
pub trait EmergencyOrder {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Tooltip text.
    fn summary(&self, state: &GameState) -> String;

    /// Reuse restriction.
    fn cooldown(&self) -> Cooldown;

    /// Cost paid on issue.
    fn cost(&self) -> ResourceBundle {
        ResourceBundle::new()
    }

    /// Whether the order may be issued now.
    fn can_issue(&self, _state: &GameState) -> Result<(), RuleRefusal> {
        Ok(())
    }

    /// Effects, all confined to the day of issue unless stated otherwise.
    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport);
}

/// People sent beyond the walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crew {
    /// Healthy workers.
    pub workers: u32,
    /// Guards.
    pub guards: u32,
}

impl Crew {
    /// A crew of workers only.
    pub const fn workers(workers: u32) -> Self {
        Self { workers, guards: 0 }
    }

    /// A crew of guards only.
    pub const fn guards(guards: u32) -> Self {
        Self { workers: 0, guards }
    }

    /// Total heads.
    pub const fn size(&self) -> u32 {
        self.workers.saturating_add(self.guards)
    }
}

/// One weighted outcome of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeBand {
    /// Key passed back to [`Mission::apply_outcome`].
    pub key: &'static str,
    /// Weight out of 100.
    pub weight: u32,
}

/// Pick the band for `roll` in `0..100`: the first band whose cumulative
/// weight exceeds the roll.
pub fn select_band(bands: &[OutcomeBand], roll: u32) -> Option<&OutcomeBand> {
    let mut cumulative = 0_u32;
    bands.iter().find(|band| {
        cumulative = cumulative.saturating_add(band.weight);
        roll < cumulative
    })
}

/// A multi-day expedition with a weighted outcome.
pub trait Mission {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Tooltip text.
    fn summary(&self, state: &GameState) -> String;

    /// Who goes.
    fn crew(&self) -> Crew;

    /// Days away, counted from the day after departure.
    fn duration_days(&self) -> u32;

    /// Days after departure before the mission may be sent again.
    fn cooldown_days(&self) -> u32;

    /// Whether the mission may be started now, beyond crew availability.
    fn can_start(&self, _state: &GameState) -> Result<(), RuleRefusal> {
        Ok(())
    }

    /// Outcome table. Weights must sum to 100.
    fn bands(&self) -> &'static [OutcomeBand];

    /// Apply the outcome selected by `key`. Returns the crew members who
    /// did not come back; the engine removes them and releases the rest.
    fn apply_outcome(&self, key: &str, state: &mut GameState, report: &mut DayResolutionReport) -> Crew;
}

/// Whether an event fires today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Not today.
    Never,
    /// Certainly today.
    Always,
    /// With this percent chance, rolled by the engine.
    Chance(u32),
}

/// Something that happens to the settlement.
pub trait TriggeredEvent {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Days the event stays dormant after firing. Zero for none.
    fn cooldown_days(&self) -> u32 {
        0
    }

    /// Whether the event can fire only once per run.
    fn once(&self) -> bool {
        false
    }

    /// Evaluate today's trigger. Pure.
    fn trigger(&self, state: &GameState) -> Trigger;

    /// Response menu. Empty for events that simply happen.
    fn responses(&self) -> &'static [&'static str] {
        &[]
    }

    /// Response used when the responder gives none or an unknown one.
    fn default_response(&self) -> Option<&'static str> {
        None
    }

    /// Apply the event with the chosen response, if any.
    fn apply(&self, state: &mut GameState, report: &mut DayResolutionReport, response: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANDS: [OutcomeBand; 3] = [
        OutcomeBand { key: "success", weight: 40 },
        OutcomeBand { key: "partial", weight: 30 },
        OutcomeBand { key: "ambush", weight: 30 },
    ];

    fn key_for(roll: u32) -> Option<&'static str> {
        select_band(&BANDS, roll).map(|band| band.key)
    }

    #[test]
    fn bands_cover_the_roll_range() {
        assert_eq!(key_for(0), Some("success"));
        assert_eq!(key_for(39), Some("success"));
        assert_eq!(key_for(40), Some("partial"));
        assert_eq!(key_for(69), Some("partial"));
        assert_eq!(key_for(70), Some("ambush"));
        assert_eq!(key_for(99), Some("ambush"));
        assert_eq!(key_for(100), None);
    }

    #[test]
    fn require_maps_to_requirement() {
        assert!(require(true, "anything").is_ok());
        assert_eq!(
            require(false, "Tyranny >= 1"),
            Err(RuleRefusal::Requirement("Tyranny >= 1".to_owned()))
        );
    }

    #[test]
    fn crew_size() {
        assert_eq!(Crew::workers(6).size(), 6);
        assert_eq!(Crew { workers: 2, guards: 2 }.size(), 4);
        assert_eq!(Crew::guards(5).workers, 0);
    }
}
