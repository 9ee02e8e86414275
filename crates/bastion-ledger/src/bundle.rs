//! Multi-resource costs and rewards.
//!
//! A [`ResourceBundle`] is built once and handed to
//! [`ResourceLedger::try_spend`](crate::ResourceLedger::try_spend) or
//! [`ResourceLedger::grant`](crate::ResourceLedger::grant). Spending is all
//! or nothing.

use std::collections::BTreeMap;

use bastion_types::ResourceKind;
use serde::{Deserialize, Serialize};

/// A set of resource amounts, at most one per kind.
///
/// # Examples
///
/// ```
/// use bastion_ledger::ResourceBundle;
/// use bastion_types::ResourceKind;
///
/// let cost = ResourceBundle::new()
///     .with(ResourceKind::Fuel, 10)
///     .with(ResourceKind::Materials, 5);
///
/// assert_eq!(cost.amount(ResourceKind::Fuel), 10);
/// assert!(!cost.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    amounts: BTreeMap<ResourceKind, u32>,
}

impl ResourceBundle {
    /// Start an empty bundle.
    pub const fn new() -> Self {
        Self {
            amounts: BTreeMap::new(),
        }
    }

    /// Add `amount` of `resource`. Repeated kinds accumulate.
    #[must_use]
    pub fn with(mut self, resource: ResourceKind, amount: u32) -> Self {
        if amount > 0 {
            let slot = self.amounts.entry(resource).or_insert(0);
            *slot = slot.saturating_add(amount);
        }
        self
    }

    /// Amount of `resource` in the bundle.
    pub fn amount(&self, resource: ResourceKind) -> u32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Whether the bundle holds nothing.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Iterate `(resource, amount)` pairs in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.amounts.iter().map(|(kind, amount)| (*kind, *amount))
    }
}

impl core::fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (kind, amount) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{amount} {kind}")?;
            first = false;
        }
        Ok(())
    }
}
