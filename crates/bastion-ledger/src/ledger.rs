//! The settlement's stockpile: five saturating counters and a day journal.
//!
//! # Design
//!
//! - **Saturating**: debits never take stock below zero; the caller learns
//!   how much was actually consumed.
//! - **Journaled**: every non-zero movement is appended to the current
//!   day's journal with a short reason.
//! - **Conservation**: opening + credits - debits == closing per day.

use std::collections::BTreeMap;

use bastion_types::ResourceKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conservation::{ConservationResult, verify_conservation};
use crate::{LedgerError, ResourceBundle};

/// Direction of a journaled movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    /// Stock was added.
    Credit,
    /// Stock was removed.
    Debit,
}

/// One recorded stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Day the movement happened.
    pub day: u32,
    /// Resource moved.
    pub resource: ResourceKind,
    /// Direction.
    pub flow: Flow,
    /// Amount the caller asked for.
    pub requested: u32,
    /// Amount actually moved.
    pub applied: u32,
    /// Short label such as `"consumption"` or `"farming"`.
    pub reason: String,
}

/// The settlement's resource stockpile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    stock: BTreeMap<ResourceKind, u32>,
    day: u32,
    opening: BTreeMap<ResourceKind, u32>,
    journal: Vec<JournalEntry>,
}

impl ResourceLedger {
    /// Create a ledger with the given starting stock. Unlisted kinds start
    /// at zero.
    pub fn new(initial: impl IntoIterator<Item = (ResourceKind, u32)>) -> Self {
        let mut stock: BTreeMap<ResourceKind, u32> =
            ResourceKind::ALL.iter().map(|kind| (*kind, 0)).collect();
        for (kind, amount) in initial {
            stock.insert(kind, amount);
        }
        Self {
            opening: stock.clone(),
            stock,
            day: 0,
            journal: Vec::new(),
        }
    }

    /// Current stock of `resource`.
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.stock.get(&resource).copied().unwrap_or(0)
    }

    /// Snapshot of all stock, in resource order.
    pub fn snapshot(&self) -> BTreeMap<ResourceKind, u32> {
        self.stock.clone()
    }

    /// The day the journal is currently recording.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Movements recorded since the last [`open_day`](Self::open_day).
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Stock at the moment the current day was opened.
    pub fn opening(&self, resource: ResourceKind) -> u32 {
        self.opening.get(&resource).copied().unwrap_or(0)
    }

    /// Start a new journal day. The previous day's entries are discarded
    /// and the current stock becomes the opening balance.
    pub fn open_day(&mut self, day: u32) {
        self.day = day;
        self.opening = self.stock.clone();
        self.journal.clear();
    }

    /// Add `amount` of `resource`, saturating at `u32::MAX`. Returns the
    /// amount actually added.
    pub fn credit(&mut self, resource: ResourceKind, amount: u32, reason: &str) -> u32 {
        if amount == 0 {
            return 0;
        }
        let slot = self.stock.entry(resource).or_insert(0);
        let before = *slot;
        *slot = before.saturating_add(amount);
        let applied = slot.saturating_sub(before);
        self.record(resource, Flow::Credit, amount, applied, reason);
        applied
    }

    /// Remove up to `amount` of `resource`. Returns the amount actually
    /// removed, which is less than `amount` when stock runs out.
    pub fn debit(&mut self, resource: ResourceKind, amount: u32, reason: &str) -> u32 {
        if amount == 0 {
            return 0;
        }
        let slot = self.stock.entry(resource).or_insert(0);
        let applied = amount.min(*slot);
        *slot = slot.saturating_sub(applied);
        if applied < amount {
            debug!(?resource, requested = amount, applied, reason, "debit ran short");
        }
        self.record(resource, Flow::Debit, amount, applied, reason);
        applied
    }

    /// Whether the stockpile covers every amount in `cost`.
    pub fn can_afford(&self, cost: &ResourceBundle) -> bool {
        self.first_shortfall(cost).is_none()
    }

    /// Pay `cost` in full or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Insufficient`] naming the first resource that
    /// falls short. Nothing is debited in that case.
    pub fn try_spend(&mut self, cost: &ResourceBundle, reason: &str) -> Result<(), LedgerError> {
        if let Some(err) = self.first_shortfall(cost) {
            return Err(err);
        }
        for (kind, amount) in cost.iter() {
            self.debit(kind, amount, reason);
        }
        Ok(())
    }

    /// Credit every amount in `reward`.
    pub fn grant(&mut self, reward: &ResourceBundle, reason: &str) {
        for (kind, amount) in reward.iter() {
            self.credit(kind, amount, reason);
        }
    }

    /// Verify the conservation law for the current day.
    pub fn verify_conservation(&self) -> ConservationResult {
        verify_conservation(self.day, &self.opening, &self.journal, &self.stock)
    }

    fn first_shortfall(&self, cost: &ResourceBundle) -> Option<LedgerError> {
        cost.iter().find_map(|(kind, required)| {
            let available = self.get(kind);
            (available < required).then_some(LedgerError::Insufficient {
                resource: kind,
                required,
                available,
            })
        })
    }

    fn record(
        &mut self,
        resource: ResourceKind,
        flow: Flow,
        requested: u32,
        applied: u32,
        reason: &str,
    ) {
        self.journal.push(JournalEntry {
            day: self.day,
            resource,
            flow,
            requested,
            applied,
            reason: reason.to_owned(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stocked() -> ResourceLedger {
        let mut ledger = ResourceLedger::new([
            (ResourceKind::Food, 50),
            (ResourceKind::Fuel, 8),
            (ResourceKind::Materials, 30),
        ]);
        ledger.open_day(1);
        ledger
    }

    #[test]
    fn unlisted_resources_start_at_zero() {
        let ledger = stocked();
        assert_eq!(ledger.get(ResourceKind::Medicine), 0);
        assert_eq!(ledger.snapshot().len(), ResourceKind::ALL.len());
    }

    #[test]
    fn debit_beyond_stock_consumes_only_what_exists() {
        let mut ledger = stocked();
        let taken = ledger.debit(ResourceKind::Fuel, 20, "consumption");
        assert_eq!(taken, 8);
        assert_eq!(ledger.get(ResourceKind::Fuel), 0);

        let again = ledger.debit(ResourceKind::Fuel, 5, "consumption");
        assert_eq!(again, 0);
    }

    #[test]
    fn credit_saturates() {
        let mut ledger = ResourceLedger::new([(ResourceKind::Water, u32::MAX - 1)]);
        let added = ledger.credit(ResourceKind::Water, 10, "drawing");
        assert_eq!(added, 1);
        assert_eq!(ledger.get(ResourceKind::Water), u32::MAX);
    }

    #[test]
    fn try_spend_is_all_or_nothing() {
        let mut ledger = stocked();
        let cost = ResourceBundle::new()
            .with(ResourceKind::Materials, 20)
            .with(ResourceKind::Fuel, 10);

        let err = ledger.try_spend(&cost, "order").unwrap_err();
        assert_eq!(
            err,
            LedgerError::Insufficient {
                resource: ResourceKind::Fuel,
                required: 10,
                available: 8,
            }
        );
        assert_eq!(ledger.get(ResourceKind::Materials), 30);
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn try_spend_debits_every_line() {
        let mut ledger = stocked();
        let cost = ResourceBundle::new().with(ResourceKind::Materials, 20);
        assert!(ledger.can_afford(&cost));
        ledger.try_spend(&cost, "fortification").unwrap();
        assert_eq!(ledger.get(ResourceKind::Materials), 10);
        assert_eq!(ledger.journal().len(), 1);
    }

    #[test]
    fn open_day_resets_journal_and_opening() {
        let mut ledger = stocked();
        ledger.credit(ResourceKind::Food, 5, "farming");
        ledger.open_day(2);
        assert!(ledger.journal().is_empty());
        assert_eq!(ledger.opening(ResourceKind::Food), 55);
        assert_eq!(ledger.day(), 2);
    }

    #[test]
    fn journaled_day_balances() {
        let mut ledger = stocked();
        ledger.credit(ResourceKind::Food, 12, "farming");
        ledger.debit(ResourceKind::Food, 100, "consumption");
        ledger.grant(
            &ResourceBundle::new().with(ResourceKind::Materials, 7),
            "salvage",
        );
        assert_eq!(ledger.verify_conservation(), ConservationResult::Balanced);
    }
}
