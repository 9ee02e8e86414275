//! Population, recovery, job allocation, and welfare for the Bastion simulation.
//!
//! This crate holds the logic layer for the settlement's people: who is
//! healthy, sick, away, or dead; who works which job; and the formulas
//! that move sickness, unrest, and morale each day. Everything here is
//! pure state manipulation with no I/O and no randomness.
//!
//! # Modules
//!
//! - [`population`] -- Head counts, mission crews, and the recovery queue
//! - [`jobs`] -- Job table, [`JobAllocation`], and production math
//! - [`health`] -- Sickness drift, new cases, recovery caps, severe deaths
//! - [`morale`] -- Unrest and morale drift
//! - [`config`] -- [`HealthConfig`] and [`MoraleConfig`]
//! - [`error`] -- Error types ([`PeopleError`])

pub mod config;
pub mod error;
pub mod health;
pub mod jobs;
pub mod morale;
pub mod population;

// Re-export primary types at crate root for convenience.
pub use config::{HealthConfig, MoraleConfig};
pub use error::PeopleError;
pub use jobs::{
    JobAllocation, JobOutput, JobSpec, ProductionPlan, ZonePenalty, default_jobs, plan_production,
};
pub use morale::{Drift, DriftInputs};
pub use population::{DeathToll, Population, PopulationSeed, SickCohort};
