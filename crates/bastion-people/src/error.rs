//! Error types for the `bastion-people` crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use bastion_types::JobKind;

/// Errors that can occur during population and allocation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeopleError {
    /// More workers were assigned than are available.
    #[error("allocation overflow: {assigned} workers assigned but only {available} available")]
    AllocationOverflow {
        /// Total workers assigned across all jobs.
        assigned: u32,
        /// Healthy workers not committed to missions.
        available: u32,
    },

    /// A job count is not a multiple of the allocation step.
    #[error("{job} has {count} workers, which is not a multiple of {step}")]
    OffStep {
        /// The offending job.
        job: JobKind,
        /// Its worker count.
        count: u32,
        /// Required step.
        step: u32,
    },

    /// Not enough free people to commit a mission crew.
    #[error("crew unavailable: need {workers} workers and {guards} guards, have {free_workers} and {free_guards}")]
    CrewUnavailable {
        /// Workers requested.
        workers: u32,
        /// Guards requested.
        guards: u32,
        /// Workers not yet committed.
        free_workers: u32,
        /// Guards not yet committed.
        free_guards: u32,
    },
}
