//! Game state, rules, and day resolution for the Bastion siege simulation.
//!
//! This crate owns the 14-stage day pipeline that turns a player's daily
//! choice into the next day's state, along with the catalogs of laws,
//! orders, missions, and events it draws on.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `bastion-config.yaml` into
//!   strongly-typed structs.
//! - [`state`] -- [`GameState`], the single mutable snapshot of a run.
//! - [`flags`] -- Persistent paths with decaying temporary deltas.
//! - [`effects`] -- The per-day multiplier accumulator.
//! - [`rules`] -- Law, order, mission, and event traits and catalogs.
//! - [`engine`] -- [`Engine::resolve_day`] and the stage pipeline.
//! - [`decision`] -- Action sources, allocators, and event responders.
//! - [`runner`] -- [`run_to_end`], the whole-run driver.
//!
//! [`GameState`]: state::GameState
//! [`Engine::resolve_day`]: engine::Engine::resolve_day
//! [`run_to_end`]: runner::run_to_end

pub mod config;
pub mod decision;
pub mod effects;
pub mod engine;
pub mod flags;
pub mod rules;
pub mod runner;
pub mod state;

pub use config::{ConfigError, SimulationConfig};
pub use engine::{DayPhase, Engine, EngineError};
pub use rules::{Catalog, CatalogError, RuleRefusal};
pub use runner::{RunnerError, run_to_end};
pub use state::GameState;
