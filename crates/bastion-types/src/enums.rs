//! Enumeration types for the Bastion simulation.
//!
//! Every closed set the engine switches on lives here: commodities, jobs,
//! zones, stats, flag paths, milestones, terminal causes, report tags,
//! weather, and daily disruptions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A commodity tracked by the settlement's resource ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Grain, preserved meat, anything eaten.
    Food,
    /// Drinking water drawn from wells and cisterns.
    Water,
    /// Firewood, coal, and oil for heat and cooking.
    Fuel,
    /// Herbal remedies and bandages for the clinic.
    Medicine,
    /// Timber, stone, and iron used for repairs.
    Materials,
}

impl ResourceKind {
    /// All resource kinds in ledger order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Water,
        Self::Fuel,
        Self::Medicine,
        Self::Materials,
    ];

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Water => "water",
            Self::Fuel => "fuel",
            Self::Medicine => "medicine",
            Self::Materials => "materials",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// A job healthy workers can be assigned to for the day.
///
/// Declaration order is production order: jobs earlier in the list run
/// first and their output is available to later jobs on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum JobKind {
    /// Tending crops and livestock.
    Farming,
    /// Hauling water from wells.
    WaterDrawing,
    /// Cutting and scavenging fuel.
    FuelGathering,
    /// Brewing remedies.
    Apothecary,
    /// Stripping ruins for usable materials.
    Salvage,
    /// Shoring up the active perimeter.
    Repair,
    /// Nursing the sick back to health.
    Clinic,
}

impl JobKind {
    /// All jobs in production order.
    pub const ALL: [Self; 7] = [
        Self::Farming,
        Self::WaterDrawing,
        Self::FuelGathering,
        Self::Apothecary,
        Self::Salvage,
        Self::Repair,
        Self::Clinic,
    ];

    /// Human-readable job name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Farming => "Farming",
            Self::WaterDrawing => "Water Drawing",
            Self::FuelGathering => "Fuel Gathering",
            Self::Apothecary => "Apothecary",
            Self::Salvage => "Salvage",
            Self::Repair => "Repair",
            Self::Clinic => "Clinic",
        }
    }
}

impl core::fmt::Display for JobKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// A district of the settlement, ordered from the outermost wall inward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ZoneId {
    /// Fields and barns just inside the outer palisade.
    OuterFarms,
    /// Workshops and smithies.
    ArtisanQuarter,
    /// Dense housing around the old market.
    LowerWard,
    /// Temple, clinic, and merchant houses.
    UpperWard,
    /// The citadel. Its fall ends the run.
    Keep,
}

impl ZoneId {
    /// All zones, outermost first.
    pub const ALL: [Self; 5] = [
        Self::OuterFarms,
        Self::ArtisanQuarter,
        Self::LowerWard,
        Self::UpperWard,
        Self::Keep,
    ];

    /// Human-readable zone name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OuterFarms => "Outer Farms",
            Self::ArtisanQuarter => "Artisan Quarter",
            Self::LowerWard => "Lower Ward",
            Self::UpperWard => "Upper Ward",
            Self::Keep => "Keep",
        }
    }
}

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Stats and flags
// ---------------------------------------------------------------------------

/// A settlement-wide scalar stat, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StatKind {
    /// Willingness to keep going.
    Morale,
    /// Anger at the leadership. High unrest ends in revolt.
    Unrest,
    /// How sick the city is as a whole.
    Sickness,
}

/// A persistent integer "path" shaped by the player's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FlagPath {
    /// How heavy-handed the leadership has become.
    Tyranny,
    /// How much the city leans on the temple.
    Faith,
    /// Accumulated defensive engineering.
    Fortification,
    /// How frightened the populace is of its own leaders.
    FearLevel,
}

impl FlagPath {
    /// All paths in declaration order.
    pub const ALL: [Self; 4] = [Self::Tyranny, Self::Faith, Self::Fortification, Self::FearLevel];

    /// Inclusive `(min, max)` range the effective value is clamped to.
    pub const fn range(self) -> (i32, i32) {
        match self {
            Self::Tyranny | Self::Faith | Self::FearLevel => (0, 10),
            Self::Fortification => (0, 5),
        }
    }
}

/// A permanent, one-way milestone. Once reached it never clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Milestone {
    /// Martial law has been declared.
    MartialState,
    /// The temple has been given authority over daily life.
    SacredCovenant,
    /// The city has committed to permanent fortification works.
    SiegeDoctrine,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a run was lost. Variants are listed in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum GameOverCause {
    /// The Keep's integrity reached zero.
    KeepBreached,
    /// Unrest reached the revolt threshold.
    Revolt,
    /// Food and water were both exhausted for consecutive days.
    TotalCollapse,
    /// Sickness overwhelmed the able-bodied population.
    PandemicCollapse,
}

impl core::fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::KeepBreached => "the Keep was breached",
            Self::Revolt => "the people revolted",
            Self::TotalCollapse => "food and water ran out",
            Self::PandemicCollapse => "plague overwhelmed the city",
        };
        f.write_str(text)
    }
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RunOutcome {
    /// The settlement held until the target day.
    Survived,
    /// The settlement fell.
    Lost(GameOverCause),
}

impl RunOutcome {
    /// Return the loss cause, if the run was lost.
    pub const fn cause(self) -> Option<GameOverCause> {
        match self {
            Self::Survived => None,
            Self::Lost(cause) => Some(cause),
        }
    }
}

// ---------------------------------------------------------------------------
// Report tags
// ---------------------------------------------------------------------------

/// Category tag attached to each day-report log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum LogTag {
    /// Day boundaries, weather, and disruptions.
    Day,
    /// Player action accepted, rejected, or ignored.
    Action,
    /// Law enactment and daily law effects.
    Law,
    /// Emergency order effects.
    Order,
    /// Mission departures and returns.
    Mission,
    /// Triggered events.
    Event,
    /// Job output.
    Production,
    /// Daily needs.
    Consumption,
    /// Shortfalls and their penalties.
    Deficit,
    /// Population over capacity.
    Overcrowding,
    /// Sickness drift, new cases, and deaths.
    Sickness,
    /// Sick workers returning to duty.
    Recovery,
    /// Unrest and morale drift.
    Morale,
    /// Escalation and wall damage.
    Siege,
    /// Wall repairs.
    Repair,
    /// Terminal outcome.
    GameOver,
}

// ---------------------------------------------------------------------------
// Weather and disruptions
// ---------------------------------------------------------------------------

/// Weather over the settlement for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// No effect.
    #[default]
    Clear,
    /// Slows the siege engines slightly.
    Rain,
    /// Cover for sappers; walls take more damage.
    Fog,
    /// Siege engines mostly idle.
    Storm,
    /// Cold snaps crack mortar and raise fuel needs.
    Frost,
    /// Raises water needs.
    Heatwave,
}

/// A random one-day setback to a single line of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Disruption {
    /// Weevils in the seed stock.
    SpoiledGrain,
    /// Fuel stores soaked through.
    DampKindling,
    /// A well clogged with silt.
    SiltedWell,
    /// Broken saws and mallets.
    ToolShortage,
}

impl Disruption {
    /// All disruptions, in roll order.
    pub const ALL: [Self; 4] = [
        Self::SpoiledGrain,
        Self::DampKindling,
        Self::SiltedWell,
        Self::ToolShortage,
    ];

    /// Human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::SpoiledGrain => "Spoiled grain: farming output falls",
            Self::DampKindling => "Damp kindling: fuel gathering falls",
            Self::SiltedWell => "Silted well: water drawing falls",
            Self::ToolShortage => "Tool shortage: salvage and repairs falter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_are_ordered_outermost_first() {
        assert_eq!(ZoneId::ALL.first(), Some(&ZoneId::OuterFarms));
        assert_eq!(ZoneId::ALL.last(), Some(&ZoneId::Keep));
    }

    #[test]
    fn resource_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ResourceKind::Materials).unwrap_or_default();
        assert_eq!(json, "\"materials\"");
    }

    #[test]
    fn flag_ranges_are_non_empty() {
        for path in FlagPath::ALL {
            let (min, max) = path.range();
            assert!(min < max, "{path:?} has an empty range");
        }
    }

    #[test]
    fn run_outcome_exposes_cause() {
        assert_eq!(RunOutcome::Survived.cause(), None);
        assert_eq!(
            RunOutcome::Lost(GameOverCause::Revolt).cause(),
            Some(GameOverCause::Revolt)
        );
    }
}
