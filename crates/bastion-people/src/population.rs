//! The population ledger: who is alive, who can work, who is sick.
//!
//! Healthy workers and guards include those away on missions; the
//! `committed_*` counters say how many of them are out. Sick people live
//! only in the recovery queue, a FIFO of cohorts that fell ill on the same
//! day and share a countdown.
//!
//! All counts are unsigned and every removal saturates, so no sequence of
//! operations can drive a count negative.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::PeopleError;

/// A group of people who fell sick together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickCohort {
    /// People in the cohort.
    pub count: u32,
    /// Days until they can be treated back to health.
    pub days_remaining: u32,
}

/// Who died, by group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeathToll {
    /// Elderly deaths.
    pub elderly: u32,
    /// Deaths among the sick.
    pub sick: u32,
    /// Healthy worker deaths.
    pub healthy: u32,
    /// Guard deaths.
    pub guards: u32,
}

impl DeathToll {
    /// Total deaths.
    pub const fn total(&self) -> u32 {
        self.elderly
            .saturating_add(self.sick)
            .saturating_add(self.healthy)
            .saturating_add(self.guards)
    }
}

/// Starting head counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopulationSeed {
    /// Healthy workers (default: 70).
    pub healthy: u32,
    /// Guards (default: 15).
    pub guards: u32,
    /// Sick, in a single cohort (default: 5).
    pub sick: u32,
    /// Days until the starting sick can recover (default: 3).
    pub sick_days: u32,
    /// Elderly (default: 10).
    pub elderly: u32,
}

impl Default for PopulationSeed {
    fn default() -> Self {
        Self {
            healthy: 70,
            guards: 15,
            sick: 5,
            sick_days: 3,
            elderly: 10,
        }
    }
}

/// The settlement's people.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Population {
    healthy: u32,
    guards: u32,
    elderly: u32,
    recovery_queue: VecDeque<SickCohort>,
    committed_workers: u32,
    committed_guards: u32,
}

impl Population {
    /// Build the starting population.
    pub fn new(seed: &PopulationSeed) -> Self {
        let mut recovery_queue = VecDeque::new();
        if seed.sick > 0 {
            recovery_queue.push_back(SickCohort {
                count: seed.sick,
                days_remaining: seed.sick_days,
            });
        }
        Self {
            healthy: seed.healthy,
            guards: seed.guards,
            elderly: seed.elderly,
            recovery_queue,
            committed_workers: 0,
            committed_guards: 0,
        }
    }

    /// Healthy workers, including those on missions.
    pub const fn healthy(&self) -> u32 {
        self.healthy
    }

    /// Guards, including those on missions.
    pub const fn guards(&self) -> u32 {
        self.guards
    }

    /// Elderly residents.
    pub const fn elderly(&self) -> u32 {
        self.elderly
    }

    /// Everyone in the recovery queue.
    pub fn sick(&self) -> u32 {
        self.recovery_queue
            .iter()
            .fold(0_u32, |acc, cohort| acc.saturating_add(cohort.count))
    }

    /// The recovery queue, oldest cohort first.
    pub const fn recovery_queue(&self) -> &VecDeque<SickCohort> {
        &self.recovery_queue
    }

    /// Workers away on missions.
    pub const fn committed_workers(&self) -> u32 {
        self.committed_workers
    }

    /// Guards away on missions.
    pub const fn committed_guards(&self) -> u32 {
        self.committed_guards
    }

    /// Healthy workers free to be assigned to jobs.
    pub const fn available_workers(&self) -> u32 {
        self.healthy.saturating_sub(self.committed_workers)
    }

    /// Guards on the walls rather than on missions.
    pub const fn guards_at_home(&self) -> u32 {
        self.guards.saturating_sub(self.committed_guards)
    }

    /// Everyone alive.
    pub fn total(&self) -> u32 {
        self.healthy
            .saturating_add(self.guards)
            .saturating_add(self.elderly)
            .saturating_add(self.sick())
    }

    /// Everyone inside the walls: the total minus mission crews.
    pub fn residents(&self) -> u32 {
        self.total()
            .saturating_sub(self.committed_workers)
            .saturating_sub(self.committed_guards)
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// Reserve a mission crew.
    ///
    /// # Errors
    ///
    /// Returns [`PeopleError::CrewUnavailable`] if either group is short.
    /// Nothing is reserved in that case.
    pub fn commit_crew(&mut self, workers: u32, guards: u32) -> Result<(), PeopleError> {
        let free_workers = self.available_workers();
        let free_guards = self.guards_at_home();
        if workers > free_workers || guards > free_guards {
            return Err(PeopleError::CrewUnavailable {
                workers,
                guards,
                free_workers,
                free_guards,
            });
        }
        self.committed_workers = self.committed_workers.saturating_add(workers);
        self.committed_guards = self.committed_guards.saturating_add(guards);
        Ok(())
    }

    /// Bring a crew home. Counts beyond the committed totals are ignored.
    pub fn release_crew(&mut self, workers: u32, guards: u32) {
        self.committed_workers = self.committed_workers.saturating_sub(workers);
        self.committed_guards = self.committed_guards.saturating_sub(guards);
    }

    /// Crew members who died on a mission. Removes them from both the
    /// committed counters and the population. Returns the deaths applied.
    pub fn lose_crew(&mut self, workers: u32, guards: u32) -> DeathToll {
        let workers = workers.min(self.committed_workers);
        let guards = guards.min(self.committed_guards);
        self.committed_workers = self.committed_workers.saturating_sub(workers);
        self.committed_guards = self.committed_guards.saturating_sub(guards);
        self.healthy = self.healthy.saturating_sub(workers);
        self.guards = self.guards.saturating_sub(guards);
        DeathToll {
            healthy: workers,
            guards,
            ..DeathToll::default()
        }
    }

    // -----------------------------------------------------------------------
    // Sickness
    // -----------------------------------------------------------------------

    /// Move up to `count` available healthy workers into a new sick cohort.
    /// Returns how many fell sick.
    pub fn fall_sick(&mut self, count: u32, days: u32) -> u32 {
        let count = count.min(self.available_workers());
        if count == 0 {
            return 0;
        }
        self.healthy = self.healthy.saturating_sub(count);
        self.recovery_queue.push_back(SickCohort {
            count,
            days_remaining: days,
        });
        count
    }

    /// Count every cohort down by one day.
    pub fn advance_recovery(&mut self) {
        for cohort in &mut self.recovery_queue {
            cohort.days_remaining = cohort.days_remaining.saturating_sub(1);
        }
    }

    /// Sick people whose countdown has finished.
    pub fn ready_to_recover(&self) -> u32 {
        self.recovery_queue
            .iter()
            .filter(|cohort| cohort.days_remaining == 0)
            .fold(0_u32, |acc, cohort| acc.saturating_add(cohort.count))
    }

    /// Return up to `count` ready sick people to the healthy pool, oldest
    /// cohorts first. Returns how many recovered.
    pub fn recover(&mut self, count: u32) -> u32 {
        let mut left = count;
        for cohort in &mut self.recovery_queue {
            if left == 0 {
                break;
            }
            if cohort.days_remaining > 0 {
                continue;
            }
            let taken = cohort.count.min(left);
            cohort.count = cohort.count.saturating_sub(taken);
            left = left.saturating_sub(taken);
        }
        self.recovery_queue.retain(|cohort| cohort.count > 0);
        let recovered = count.saturating_sub(left);
        self.healthy = self.healthy.saturating_add(recovered);
        recovered
    }

    /// Kill up to `count` sick people, newest cohorts first. Returns how
    /// many died.
    pub fn kill_sick(&mut self, count: u32) -> u32 {
        let mut left = count;
        for cohort in self.recovery_queue.iter_mut().rev() {
            if left == 0 {
                break;
            }
            let taken = cohort.count.min(left);
            cohort.count = cohort.count.saturating_sub(taken);
            left = left.saturating_sub(taken);
        }
        self.recovery_queue.retain(|cohort| cohort.count > 0);
        count.saturating_sub(left)
    }

    // -----------------------------------------------------------------------
    // Deaths and arrivals
    // -----------------------------------------------------------------------

    /// Kill up to `count` available healthy workers. Returns how many died.
    pub fn kill_healthy(&mut self, count: u32) -> u32 {
        let dead = count.min(self.available_workers());
        self.healthy = self.healthy.saturating_sub(dead);
        dead
    }

    /// Kill up to `count` guards at home. Returns how many died.
    pub fn kill_guards(&mut self, count: u32) -> u32 {
        let dead = count.min(self.guards_at_home());
        self.guards = self.guards.saturating_sub(dead);
        dead
    }

    /// Starvation deaths: the elderly first, then the sick, then idle
    /// healthy workers, then guards at home.
    pub fn starve(&mut self, count: u32) -> DeathToll {
        let elderly = count.min(self.elderly);
        self.elderly = self.elderly.saturating_sub(elderly);
        let mut left = count.saturating_sub(elderly);

        let sick = self.kill_sick(left);
        left = left.saturating_sub(sick);
        let healthy = self.kill_healthy(left);
        left = left.saturating_sub(healthy);
        let guards = self.kill_guards(left);

        DeathToll {
            elderly,
            sick,
            healthy,
            guards,
        }
    }

    /// Guards who walk away. Returns how many left.
    pub fn desert(&mut self, count: u32) -> u32 {
        self.kill_guards(count)
    }

    /// Turn up to `count` available healthy workers into guards. Returns
    /// how many were conscripted.
    pub fn conscript(&mut self, count: u32) -> u32 {
        let moved = count.min(self.available_workers());
        self.healthy = self.healthy.saturating_sub(moved);
        self.guards = self.guards.saturating_add(moved);
        moved
    }

    /// New arrivals.
    pub const fn admit(&mut self, healthy: u32, elderly: u32) {
        self.healthy = self.healthy.saturating_add(healthy);
        self.elderly = self.elderly.saturating_add(elderly);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn town() -> Population {
        Population::new(&PopulationSeed::default())
    }

    #[test]
    fn default_population_counts() {
        let pop = town();
        assert_eq!(pop.healthy(), 70);
        assert_eq!(pop.guards(), 15);
        assert_eq!(pop.sick(), 5);
        assert_eq!(pop.elderly(), 10);
        assert_eq!(pop.total(), 100);
    }

    #[test]
    fn crew_is_reserved_and_released() {
        let mut pop = town();
        pop.commit_crew(6, 2).unwrap();
        assert_eq!(pop.available_workers(), 64);
        assert_eq!(pop.guards_at_home(), 13);
        assert_eq!(pop.residents(), 92);
        pop.release_crew(6, 2);
        assert_eq!(pop.available_workers(), 70);
    }

    #[test]
    fn oversized_crew_is_refused() {
        let mut pop = town();
        let err = pop.commit_crew(0, 20).unwrap_err();
        assert!(matches!(err, PeopleError::CrewUnavailable { free_guards: 15, .. }));
        assert_eq!(pop.committed_guards(), 0);
    }

    #[test]
    fn lost_crew_leaves_the_population() {
        let mut pop = town();
        pop.commit_crew(3, 0).unwrap();
        let toll = pop.lose_crew(3, 0);
        assert_eq!(toll.total(), 3);
        assert_eq!(pop.healthy(), 67);
        assert_eq!(pop.committed_workers(), 0);
    }

    #[test]
    fn sickness_only_takes_available_workers() {
        let mut pop = town();
        pop.commit_crew(68, 0).unwrap();
        assert_eq!(pop.fall_sick(10, 4), 2);
        assert_eq!(pop.sick(), 7);
        assert_eq!(pop.available_workers(), 0);
    }

    #[test]
    fn recovery_requires_countdown() {
        let mut pop = town();
        assert_eq!(pop.ready_to_recover(), 0);
        assert_eq!(pop.recover(5), 0);
        for _ in 0..3 {
            pop.advance_recovery();
        }
        assert_eq!(pop.ready_to_recover(), 5);
        assert_eq!(pop.recover(2), 2);
        assert_eq!(pop.sick(), 3);
        assert_eq!(pop.healthy(), 72);
    }

    #[test]
    fn countdown_never_goes_negative() {
        let mut pop = town();
        for _ in 0..10 {
            pop.advance_recovery();
        }
        assert!(pop.recovery_queue().iter().all(|c| c.days_remaining == 0));
    }

    #[test]
    fn starvation_takes_elderly_first() {
        let mut pop = town();
        let toll = pop.starve(12);
        assert_eq!(toll.elderly, 10);
        assert_eq!(toll.sick, 2);
        assert_eq!(toll.healthy, 0);
        assert_eq!(pop.elderly(), 0);
        assert_eq!(pop.sick(), 3);
    }

    #[test]
    fn kills_saturate() {
        let mut pop = town();
        assert_eq!(pop.kill_guards(100), 15);
        assert_eq!(pop.guards(), 0);
        assert_eq!(pop.kill_sick(100), 5);
        assert_eq!(pop.sick(), 0);
        assert!(pop.recovery_queue().is_empty());
    }

    #[test]
    fn conscription_moves_workers_to_guards() {
        let mut pop = town();
        assert_eq!(pop.conscript(10), 10);
        assert_eq!(pop.healthy(), 60);
        assert_eq!(pop.guards(), 25);
    }
}
