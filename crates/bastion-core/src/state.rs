//! The complete, serializable state of one run.
//!
//! [`GameState`] is the unit the engine transforms one day at a time. It
//! owns the run's only random number generator, so two states built from
//! the same seed and fed the same inputs stay identical. The RNG is left
//! out of snapshots.

use std::collections::{BTreeMap, BTreeSet};

use bastion_ledger::ResourceLedger;
use bastion_people::{JobAllocation, Population};
use bastion_types::numeric::shift_stat;
use bastion_types::{
    DayResolutionReport, Disruption, EventId, LawId, LogTag, MissionId, OrderId, ResourceKind,
    RunOutcome, RunSummary, StatKind, Weather, ZoneId,
};
use bastion_world::{Perimeter, SiegeState};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::config::{ConfigError, SimulationConfig};
use crate::effects::DailyEffects;
use crate::flags::Flags;

// ---------------------------------------------------------------------------
// RNG
// ---------------------------------------------------------------------------

/// The run's single seeded random stream.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed a new stream.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.0.fill_bytes(dst);
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The three settlement-wide stats, each clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    morale: u32,
    unrest: u32,
    sickness: u32,
}

impl Stats {
    /// Build stats, clamping each into range.
    pub fn new(morale: u32, unrest: u32, sickness: u32) -> Self {
        Self {
            morale: shift_stat(morale, 0),
            unrest: shift_stat(unrest, 0),
            sickness: shift_stat(sickness, 0),
        }
    }

    /// Current morale.
    pub const fn morale(&self) -> u32 {
        self.morale
    }

    /// Current unrest.
    pub const fn unrest(&self) -> u32 {
        self.unrest
    }

    /// Current sickness.
    pub const fn sickness(&self) -> u32 {
        self.sickness
    }

    /// Read a stat by kind.
    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Morale => self.morale,
            StatKind::Unrest => self.unrest,
            StatKind::Sickness => self.sickness,
        }
    }

    /// Shift a stat by a signed delta, clamping to `0..=100`.
    pub fn shift(&mut self, kind: StatKind, delta: i32) {
        let slot = self.slot(kind);
        *slot = shift_stat(*slot, delta);
    }

    /// Overwrite a stat, clamping to `0..=100`.
    pub fn set(&mut self, kind: StatKind, value: u32) {
        *self.slot(kind) = shift_stat(value, 0);
    }

    const fn slot(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Morale => &mut self.morale,
            StatKind::Unrest => &mut self.unrest,
            StatKind::Sickness => &mut self.sickness,
        }
    }
}

// ---------------------------------------------------------------------------
// Cooldowns
// ---------------------------------------------------------------------------

/// When each rule kind may next be used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cooldowns {
    last_law_day: Option<u32>,
    orders: BTreeMap<OrderId, u32>,
    missions: BTreeMap<MissionId, u32>,
    events: BTreeMap<EventId, u32>,
}

impl Cooldowns {
    /// First day a law may be enacted given the shared law cooldown, or
    /// `None` if one may be enacted now.
    pub fn law_ready_on(&self, day: u32, cooldown_days: u32) -> Option<u32> {
        ready_on(self.last_law_day, day, cooldown_days)
    }

    /// Record a law enactment.
    pub const fn enacted_law(&mut self, day: u32) {
        self.last_law_day = Some(day);
    }

    /// First day `order` may be reissued, or `None` if it may be issued now.
    pub fn order_ready_on(&self, order: &OrderId, day: u32, cooldown_days: u32) -> Option<u32> {
        ready_on(self.orders.get(order).copied(), day, cooldown_days)
    }

    /// Whether `order` was ever issued.
    pub fn order_used(&self, order: &OrderId) -> bool {
        self.orders.contains_key(order)
    }

    /// Record an order being issued.
    pub fn issued_order(&mut self, order: OrderId, day: u32) {
        self.orders.insert(order, day);
    }

    /// First day `mission` may be dispatched again, or `None` if now.
    pub fn mission_ready_on(&self, mission: &MissionId, day: u32, cooldown_days: u32) -> Option<u32> {
        ready_on(self.missions.get(mission).copied(), day, cooldown_days)
    }

    /// Record a mission departure.
    pub fn dispatched_mission(&mut self, mission: MissionId, day: u32) {
        self.missions.insert(mission, day);
    }

    /// Days left on an event's cooldown.
    pub fn event_remaining(&self, event: &EventId) -> u32 {
        self.events.get(event).copied().unwrap_or(0)
    }

    /// Start an event's cooldown. Zero clears it.
    pub fn start_event(&mut self, event: EventId, days: u32) {
        if days == 0 {
            self.events.remove(&event);
        } else {
            self.events.insert(event, days);
        }
    }

    /// Count every event cooldown down one day.
    pub fn tick_events(&mut self) {
        for days in self.events.values_mut() {
            *days = days.saturating_sub(1);
        }
        self.events.retain(|_, days| *days > 0);
    }
}

fn ready_on(last_used: Option<u32>, day: u32, cooldown_days: u32) -> Option<u32> {
    let ready = last_used?.saturating_add(cooldown_days);
    (day < ready).then_some(ready)
}

// ---------------------------------------------------------------------------
// Day tracking
// ---------------------------------------------------------------------------

/// Counters that carry across days and scratch values for the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayTracking {
    /// Today's weather.
    pub weather: Weather,
    /// Today's disruption.
    pub disruption: Option<Disruption>,
    /// Resources that ran short today.
    pub deficits: BTreeSet<ResourceKind>,
    /// Unmet need per resource today.
    pub shortfalls: BTreeMap<ResourceKind, u32>,
    /// Consecutive deficit days per resource.
    pub consecutive_deficits: BTreeMap<ResourceKind, u32>,
    /// Consecutive days ending with food and water both at zero.
    pub both_empty_days: u32,
    /// Overcrowding stacks today.
    pub overcrowding_stacks: u32,
    /// Repair points produced today and not yet applied.
    pub pending_repair: u32,
    /// Clinic capacity today.
    pub clinic_capacity: u32,
    /// Days of plague left.
    pub plague_days: u32,
}

impl DayTracking {
    /// Clear today's scratch values. Streaks and the plague persist.
    pub fn reset_day(&mut self) {
        self.disruption = None;
        self.deficits.clear();
        self.shortfalls.clear();
        self.overcrowding_stacks = 0;
        self.pending_repair = 0;
        self.clinic_capacity = 0;
    }

    /// Whether `resource` ran short today.
    pub fn in_deficit(&self, resource: ResourceKind) -> bool {
        self.deficits.contains(&resource)
    }

    /// Consecutive deficit days for `resource`.
    pub fn streak(&self, resource: ResourceKind) -> u32 {
        self.consecutive_deficits.get(&resource).copied().unwrap_or(0)
    }

    /// Whether a plague rages.
    pub const fn plague(&self) -> bool {
        self.plague_days > 0
    }
}

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

/// A crew away from the walls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveMission {
    /// Which mission.
    pub id: MissionId,
    /// Days until the crew returns.
    pub days_remaining: u32,
    /// Workers in the crew.
    pub workers: u32,
    /// Guards in the crew.
    pub guards: u32,
    /// Day the crew left.
    pub started_on: u32,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Running totals for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunHistory {
    /// Days resolved so far.
    pub days_played: u32,
    /// Deaths from every cause.
    pub total_deaths: u32,
    /// Every event that fired, with repeats.
    pub events_fired: Vec<EventId>,
    /// Zones that fell, in order.
    pub zones_lost: Vec<ZoneId>,
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Everything about a run in progress.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// The day about to be resolved, starting at 1.
    pub day: u32,
    /// Stockpile.
    pub resources: ResourceLedger,
    /// Head counts and the recovery queue.
    pub population: Population,
    /// Zones and their walls.
    pub perimeter: Perimeter,
    /// Workers assigned to each job for the next day.
    pub jobs: JobAllocation,
    /// Crews away, in departure order.
    pub active_missions: Vec<ActiveMission>,
    /// Laws in force, in enactment order.
    pub active_laws: Vec<LawId>,
    /// Order issued today.
    pub active_order: Option<OrderId>,
    /// Rule cooldowns.
    pub cooldowns: Cooldowns,
    /// One-shot events that already fired.
    pub fired_events: BTreeSet<EventId>,
    /// Morale, unrest, sickness.
    pub stats: Stats,
    /// Paths and milestones.
    pub flags: Flags,
    /// Siege clock.
    pub siege: SiegeState,
    /// Streaks and per-day scratch values.
    pub tracking: DayTracking,
    /// Today's multipliers.
    pub effects: DailyEffects,
    /// Set once the run ends.
    pub outcome: Option<RunOutcome>,
    /// Totals for the summary.
    pub history: RunHistory,
    /// The run's only random stream.
    #[serde(skip)]
    pub rng: SimRng,
}

impl GameState {
    /// Build day one from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Layout`] if the zones do not form a perimeter.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let perimeter = Perimeter::from_specs(&config.starting.zones)?;
        let starting = &config.starting;
        Ok(Self {
            day: 1,
            resources: ResourceLedger::new(starting.resources.iter().map(|(kind, amount)| (*kind, *amount))),
            population: Population::new(&starting.population),
            perimeter,
            jobs: JobAllocation::new(),
            active_missions: Vec::new(),
            active_laws: Vec::new(),
            active_order: None,
            cooldowns: Cooldowns::default(),
            fired_events: BTreeSet::new(),
            stats: Stats::new(starting.morale, starting.unrest, starting.sickness),
            flags: Flags::new(),
            siege: SiegeState::new(&config.siege),
            tracking: DayTracking::default(),
            effects: DailyEffects::new(),
            outcome: None,
            history: RunHistory::default(),
            rng: SimRng::seeded(config.run.seed),
        })
    }

    /// Whether the run has ended.
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether `law` is in force.
    pub fn law_active(&self, law: &str) -> bool {
        self.active_laws.iter().any(|active| active == law)
    }

    /// Whether a crew is away on `mission`.
    pub fn mission_active(&self, mission: &str) -> bool {
        self.active_missions.iter().any(|active| active.id == mission)
    }

    /// Shift a stat.
    pub fn shift(&mut self, kind: StatKind, delta: i32) {
        self.stats.shift(kind, delta);
    }

    /// Count deaths toward the day report and the run totals.
    pub fn record_deaths(&mut self, report: &mut DayResolutionReport, count: u32) {
        if count == 0 {
            return;
        }
        report.add_deaths(count);
        self.history.total_deaths = self.history.total_deaths.saturating_add(count);
    }

    /// Shrink the job allocation to the workers actually free. Returns the
    /// number of assignments removed.
    pub fn fit_allocation(&mut self, report: &mut DayResolutionReport) -> u32 {
        let removed = self.jobs.shrink_to(self.population.available_workers());
        if removed > 0 {
            report.log(
                LogTag::Action,
                format!("{removed} job assignments dropped: not enough workers"),
            );
        }
        removed
    }

    /// Digest of a finished run. `None` while the run is still going.
    pub fn summary(&self) -> Option<RunSummary> {
        let outcome = self.outcome?;
        Some(RunSummary {
            outcome,
            last_day: self.day.saturating_sub(1),
            days_played: self.history.days_played,
            final_resources: self.resources.snapshot(),
            survivors: self.population.total(),
            total_deaths: self.history.total_deaths,
            laws: self.active_laws.clone(),
            events_fired: self.history.events_fired.clone(),
            zones_lost: self.history.zones_lost.clone(),
            morale: self.stats.morale(),
            unrest: self.stats.unrest(),
            sickness: self.stats.sickness(),
        })
    }
}
