//! Conservation law verification for the resource ledger.
//!
//! For each resource R on day D the check is:
//!
//! ```text
//! opening(R) + sum(applied credits for R) - sum(applied debits for R) == closing(R)
//! ```
//!
//! Sums are taken in `u64` so a long day of saturating flows cannot
//! overflow the check itself. Every mutation of the stockpile goes through
//! the journal, so this passes by construction; it exists to catch any
//! path that writes stock without recording it.

use std::collections::BTreeMap;

use bastion_types::ResourceKind;

use crate::LedgerAnomaly;
use crate::ledger::{Flow, JournalEntry};

/// The result of a conservation check for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// The ledger is balanced for this day.
    Balanced,
    /// One or more resources moved without a matching journal entry.
    Anomaly(LedgerAnomaly),
}

impl ConservationResult {
    /// Whether the day balanced.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify the conservation law for `day`.
///
/// Journal entries recorded for other days are ignored.
pub fn verify_conservation(
    day: u32,
    opening: &BTreeMap<ResourceKind, u32>,
    journal: &[JournalEntry],
    closing: &BTreeMap<ResourceKind, u32>,
) -> ConservationResult {
    let mut imbalances: BTreeMap<ResourceKind, (u64, u64)> = BTreeMap::new();

    for kind in ResourceKind::ALL {
        let start = u64::from(opening.get(&kind).copied().unwrap_or(0));
        let (credits, debits) = journal
            .iter()
            .filter(|entry| entry.day == day && entry.resource == kind)
            .fold((0_u64, 0_u64), |(credits, debits), entry| match entry.flow {
                Flow::Credit => (credits.saturating_add(u64::from(entry.applied)), debits),
                Flow::Debit => (credits, debits.saturating_add(u64::from(entry.applied))),
            });
        let actual = u64::from(closing.get(&kind).copied().unwrap_or(0));

        // Compare without subtraction: start + credits == actual + debits.
        let inflow = start.saturating_add(credits);
        if inflow != actual.saturating_add(debits) {
            let expected = inflow.saturating_sub(debits);
            imbalances.insert(kind, (expected, actual));
        }
    }

    if imbalances.is_empty() {
        ConservationResult::Balanced
    } else {
        let count = imbalances.len();
        ConservationResult::Anomaly(LedgerAnomaly {
            day,
            imbalances,
            message: format!(
                "LEDGER_ANOMALY on day {day}: conservation law violated for {count} resource(s)",
            ),
        })
    }
}
