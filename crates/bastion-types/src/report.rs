//! Output types handed to the view layer after each day and at run end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Disruption, LogTag, ResourceKind, RunOutcome, Weather, ZoneId};
use crate::ids::{EventId, LawId, MissionId};

/// One tagged line of the day's narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Category of the entry.
    pub tag: LogTag,
    /// Human-readable text.
    pub message: String,
}

/// Need versus actual consumption for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConsumptionLine {
    /// Resource consumed.
    pub resource: ResourceKind,
    /// Amount the population needed.
    pub needed: u32,
    /// Amount actually taken from stock.
    pub consumed: u32,
}

impl ConsumptionLine {
    /// Units the stock could not cover.
    pub const fn shortfall(&self) -> u32 {
        self.needed.saturating_sub(self.consumed)
    }
}

/// A mission that came home today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MissionSummary {
    /// Mission that resolved.
    pub mission: MissionId,
    /// Key of the outcome band that was rolled.
    pub outcome: String,
    /// Day the crew left.
    pub started_on: u32,
}

/// Sickness movement for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RecoveryStats {
    /// Sick people returned to the healthy pool.
    pub recovered: u32,
    /// Healthy workers who fell sick.
    pub new_cases: u32,
    /// Sick people who died of severe sickness.
    pub deaths: u32,
    /// Whether recovery was blocked by high city-wide sickness.
    pub blocked: bool,
}

/// Everything that happened during one resolved day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayResolutionReport {
    /// The day that was resolved.
    pub day: u32,
    /// Weather rolled for the day.
    pub weather: Weather,
    /// Disruption rolled for the day, if any.
    pub disruption: Option<Disruption>,
    /// Ordered narrative of the day.
    pub entries: Vec<LogEntry>,
    /// Events that fired, in registration order.
    pub triggered_events: Vec<EventId>,
    /// Missions that returned.
    pub resolved_missions: Vec<MissionSummary>,
    /// Units produced per resource.
    pub production: BTreeMap<ResourceKind, u32>,
    /// Repair points produced by the repair crews.
    pub repair_points: u32,
    /// Integrity the siege took from the active perimeter.
    pub siege_damage: u32,
    /// Daily consumption per resource.
    pub consumption: Vec<ConsumptionLine>,
    /// Resources that ran short today.
    pub deficits: Vec<ResourceKind>,
    /// Sickness and recovery totals.
    pub recovery: RecoveryStats,
    /// Every death of the day, severe sickness included.
    pub deaths: u32,
    /// Zones lost today.
    pub zones_lost: Vec<ZoneId>,
    /// Terminal outcome, if the run ended today.
    pub outcome: Option<RunOutcome>,
}

impl DayResolutionReport {
    /// Start an empty report for `day`.
    pub const fn new(day: u32) -> Self {
        Self {
            day,
            weather: Weather::Clear,
            disruption: None,
            entries: Vec::new(),
            triggered_events: Vec::new(),
            resolved_missions: Vec::new(),
            production: BTreeMap::new(),
            repair_points: 0,
            siege_damage: 0,
            consumption: Vec::new(),
            deficits: Vec::new(),
            recovery: RecoveryStats {
                recovered: 0,
                new_cases: 0,
                deaths: 0,
                blocked: false,
            },
            deaths: 0,
            zones_lost: Vec::new(),
            outcome: None,
        }
    }

    /// Append a tagged log line.
    pub fn log(&mut self, tag: LogTag, message: impl Into<String>) {
        self.entries.push(LogEntry {
            tag,
            message: message.into(),
        });
    }

    /// Iterate over entries carrying `tag`.
    pub fn entries_tagged(&self, tag: LogTag) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.tag == tag)
    }

    /// Whether any entry carries `tag`.
    pub fn has_tag(&self, tag: LogTag) -> bool {
        self.entries.iter().any(|entry| entry.tag == tag)
    }

    /// Record deaths not covered by [`RecoveryStats`].
    pub const fn add_deaths(&mut self, count: u32) {
        self.deaths = self.deaths.saturating_add(count);
    }
}

/// End-of-run digest for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunSummary {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Last day that was resolved.
    pub last_day: u32,
    /// Number of days resolved.
    pub days_played: u32,
    /// Stock on hand at the end.
    pub final_resources: BTreeMap<ResourceKind, u32>,
    /// Living population at the end.
    pub survivors: u32,
    /// Total deaths over the run.
    pub total_deaths: u32,
    /// Laws in force at the end, in enactment order.
    pub laws: Vec<LawId>,
    /// Every event that fired, with repeats.
    pub events_fired: Vec<EventId>,
    /// Zones that fell, in order.
    pub zones_lost: Vec<ZoneId>,
    /// Final morale.
    pub morale: u32,
    /// Final unrest.
    pub unrest: u32,
    /// Final sickness.
    pub sickness: u32,
}
