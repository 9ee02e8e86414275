//! Persistent paths and permanent milestones shaped by the player's choices.
//!
//! Each [`FlagPath`] has a base value plus a list of temporary deltas that
//! expire after a number of days. The effective value is the base plus
//! every live delta, clamped to the path's range. Temporary deltas count
//! down once per day in finalization; a delta added for `n` days is live on
//! the day it was added and the `n - 1` days after.
//!
//! Milestones are one-way: once reached they never clear.

use std::collections::{BTreeMap, BTreeSet};

use bastion_types::{FlagPath, Milestone};
use serde::Serialize;

/// A temporary adjustment waiting to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingDelta {
    /// Signed change while live.
    pub delta: i32,
    /// Days left, including today.
    pub days_remaining: u32,
}

/// One path's base value and pending reversals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathValue {
    base: i32,
    pending: Vec<PendingDelta>,
}

impl PathValue {
    /// Permanent component.
    pub const fn base(&self) -> i32 {
        self.base
    }

    /// Live temporary deltas.
    pub fn pending(&self) -> &[PendingDelta] {
        &self.pending
    }
}

/// All paths and milestones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    paths: BTreeMap<FlagPath, PathValue>,
    milestones: BTreeSet<Milestone>,
}

impl Flags {
    /// Every path at zero, no milestones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective value of `path`, clamped to its range.
    pub fn get(&self, path: FlagPath) -> i32 {
        let (min, max) = path.range();
        let Some(value) = self.paths.get(&path) else {
            return 0_i32.clamp(min, max);
        };
        value
            .pending
            .iter()
            .fold(value.base, |acc, pending| acc.saturating_add(pending.delta))
            .clamp(min, max)
    }

    /// Permanently shift the base of `path`, clamped to its range.
    pub fn adjust(&mut self, path: FlagPath, delta: i32) {
        let (min, max) = path.range();
        let value = self.paths.entry(path).or_default();
        value.base = value.base.saturating_add(delta).clamp(min, max);
    }

    /// Add a delta that lapses after `days` days. Zero days or a zero
    /// delta does nothing.
    pub fn add_temporary(&mut self, path: FlagPath, delta: i32, days: u32) {
        if days == 0 || delta == 0 {
            return;
        }
        self.paths.entry(path).or_default().pending.push(PendingDelta {
            delta,
            days_remaining: days,
        });
    }

    /// Count every temporary delta down one day and drop the expired ones.
    pub fn tick(&mut self) {
        for value in self.paths.values_mut() {
            for pending in &mut value.pending {
                pending.days_remaining = pending.days_remaining.saturating_sub(1);
            }
            value.pending.retain(|pending| pending.days_remaining > 0);
        }
    }

    /// Read the raw state of a path.
    pub fn path(&self, path: FlagPath) -> Option<&PathValue> {
        self.paths.get(&path)
    }

    /// Reach a milestone. Returns `true` if it was newly reached.
    pub fn reach(&mut self, milestone: Milestone) -> bool {
        self.milestones.insert(milestone)
    }

    /// Whether a milestone has been reached.
    pub fn has(&self, milestone: Milestone) -> bool {
        self.milestones.contains(&milestone)
    }
}
