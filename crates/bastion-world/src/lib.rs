//! Zones, perimeter, siege, and weather for the Bastion simulation.
//!
//! This crate models the physical settlement: an ordered ring of zones
//! whose outermost standing member absorbs the besiegers' daily damage,
//! the siege's escalating intensity, and the weather and disruptions
//! rolled each morning.
//!
//! # Modules
//!
//! - [`zone`] -- A single district with one-way loss.
//! - [`perimeter`] -- The ordered ring and the active perimeter.
//! - [`siege`] -- Intensity, escalation, and damage formula.
//! - [`environment`] -- Weather and disruption rolls and their effects.
//! - [`layout`] -- The default five-zone layout.
//! - [`config`] -- Siege, weather, and disruption tunables.
//! - [`error`] -- Error types for layout construction.

pub mod config;
pub mod environment;
pub mod error;
pub mod layout;
pub mod perimeter;
pub mod siege;
pub mod zone;

// Re-export primary types at crate root.
pub use config::{DisruptionConfig, SiegeConfig, WeatherConfig};
pub use environment::{
    disruption_effects, roll_disruption, roll_weather, weather_need_effects,
    weather_siege_multiplier,
};
pub use error::WorldError;
pub use layout::default_zones;
pub use perimeter::{DamageOutcome, Perimeter};
pub use siege::{Escalation, SiegePressure, SiegeState, fortification_multiplier};
pub use zone::{MAX_INTEGRITY, Zone, ZoneSpec};
