//! Resource stockpile and daily journal for the Bastion simulation.
//!
//! Every unit of food, water, fuel, medicine, and materials in the city is
//! held by one [`ResourceLedger`]. Stock never goes negative: debits
//! saturate at zero and report how much was actually taken. Every credit
//! and debit is journaled against the current day so the end-of-day
//! conservation check can prove the stockpile moved only through recorded
//! flows.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`ResourceLedger`] struct: stock, journal, day boundary.
//! - [`bundle`] -- The [`ResourceBundle`] builder for multi-resource costs.
//! - [`conservation`] -- Per-day conservation verification.
//!
//! # Conservation Law
//!
//! For every day D and every resource R:
//!
//! ```text
//! opening(R, D) + credits(R, D) - debits(R, D) == closing(R, D)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! # Usage
//!
//! ```
//! use bastion_ledger::{ConservationResult, ResourceLedger};
//! use bastion_types::ResourceKind;
//!
//! let mut ledger = ResourceLedger::new([(ResourceKind::Food, 10)]);
//! ledger.open_day(1);
//!
//! let eaten = ledger.debit(ResourceKind::Food, 15, "consumption");
//! assert_eq!(eaten, 10);
//! assert_eq!(ledger.get(ResourceKind::Food), 0);
//!
//! assert_eq!(ledger.verify_conservation(), ConservationResult::Balanced);
//! ```

pub mod bundle;
pub mod conservation;
pub mod ledger;

// Re-export primary types at crate root.
pub use bundle::ResourceBundle;
pub use conservation::ConservationResult;
pub use ledger::{Flow, JournalEntry, ResourceLedger};

use std::collections::BTreeMap;

use bastion_types::ResourceKind;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when spending from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A cost could not be paid in full. Nothing was debited.
    #[error("not enough {resource}: need {required}, have {available}")]
    Insufficient {
        /// The resource that ran short.
        resource: ResourceKind,
        /// Amount the cost requires.
        required: u32,
        /// Amount on hand.
        available: u32,
    },
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation law violation detected during day verification.
///
/// When the opening stock plus journaled credits minus journaled debits
/// does not match the closing stock for one or more resources, this struct
/// captures the details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// The day where the anomaly was detected.
    pub day: u32,
    /// Per-resource imbalance: (`expected_closing`, `actual_closing`).
    pub imbalances: BTreeMap<ResourceKind, (u64, u64)>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
