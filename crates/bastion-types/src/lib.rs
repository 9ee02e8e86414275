//! Shared type definitions for the Bastion siege simulation.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the Bastion workspace. Report types flow downstream to `TypeScript` via
//! `ts-rs` for the external view layer.
//!
//! # Modules
//!
//! - [`enums`] -- Resources, jobs, zones, stats, flags, outcomes, weather
//! - [`ids`] -- Typed string keys for laws, orders, missions, and events
//! - [`actions`] -- The player's daily [`TurnActionChoice`]
//! - [`report`] -- [`DayResolutionReport`] and [`RunSummary`]
//! - [`numeric`] -- Decimal rounding and stat clamping helpers

pub mod actions;
pub mod enums;
pub mod ids;
pub mod numeric;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use actions::TurnActionChoice;
pub use enums::{
    Disruption, FlagPath, GameOverCause, JobKind, LogTag, Milestone, ResourceKind, RunOutcome,
    StatKind, Weather, ZoneId,
};
pub use ids::{EventId, LawId, MissionId, OrderId};
pub use report::{
    ConsumptionLine, DayResolutionReport, LogEntry, MissionSummary, RecoveryStats, RunSummary,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Types with #[ts(export)] write their bindings to `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::LawId::export_all();
        let _ = crate::ids::OrderId::export_all();
        let _ = crate::ids::MissionId::export_all();
        let _ = crate::ids::EventId::export_all();

        // Enums
        let _ = crate::enums::ResourceKind::export_all();
        let _ = crate::enums::JobKind::export_all();
        let _ = crate::enums::ZoneId::export_all();
        let _ = crate::enums::StatKind::export_all();
        let _ = crate::enums::FlagPath::export_all();
        let _ = crate::enums::Milestone::export_all();
        let _ = crate::enums::GameOverCause::export_all();
        let _ = crate::enums::RunOutcome::export_all();
        let _ = crate::enums::LogTag::export_all();
        let _ = crate::enums::Weather::export_all();
        let _ = crate::enums::Disruption::export_all();

        // Actions and reports
        let _ = crate::actions::TurnActionChoice::export_all();
        let _ = crate::report::LogEntry::export_all();
        let _ = crate::report::ConsumptionLine::export_all();
        let _ = crate::report::MissionSummary::export_all();
        let _ = crate::report::RecoveryStats::export_all();
        let _ = crate::report::DayResolutionReport::export_all();
        let _ = crate::report::RunSummary::export_all();
    }
}
