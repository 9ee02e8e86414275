//! Tunables for the siege, weather, and disruption systems.
//!
//! These structs mirror the `siege` section of `bastion-config.yaml`.
//! Percentages are stored as integers and converted to multipliers at the
//! point of use.

use bastion_types::Weather;
use serde::Deserialize;

/// Siege pressure and damage parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiegeConfig {
    /// Damage before intensity and multipliers (default: 4).
    pub base_damage: u32,
    /// Intensity on day one (default: 1).
    pub starting_intensity: u32,
    /// Days between scheduled escalations (default: 7).
    pub escalation_interval_days: u32,
    /// Pressure flags needed to force an early escalation (default: 3).
    pub pressure_threshold: u32,
    /// Unrest at or above which the city counts as restless (default: 60).
    pub pressure_unrest: u32,
    /// Sickness at or above which the city counts as ailing (default: 60).
    pub pressure_sickness: u32,
    /// Lost zones at or above which the walls count as crumbling (default: 2).
    pub pressure_lost_zones: u32,
    /// Length of the final assault window in days (default: 5).
    pub final_assault_days: u32,
    /// Damage multiplier during the final assault (default: 150%).
    pub final_assault_pct: u32,
    /// Damage reduction per fortification level (default: 5%).
    pub fortification_reduction_pct: u32,
    /// Morale lost when a zone falls (default: 10).
    pub zone_loss_morale: u32,
    /// Unrest gained when a zone falls (default: 5).
    pub zone_loss_unrest: u32,
    /// Weather odds and effects.
    pub weather: WeatherConfig,
    /// Daily disruption odds and severities.
    pub disruptions: DisruptionConfig,
}

impl Default for SiegeConfig {
    fn default() -> Self {
        Self {
            base_damage: 4,
            starting_intensity: 1,
            escalation_interval_days: 7,
            pressure_threshold: 3,
            pressure_unrest: 60,
            pressure_sickness: 60,
            pressure_lost_zones: 2,
            final_assault_days: 5,
            final_assault_pct: 150,
            fortification_reduction_pct: 5,
            zone_loss_morale: 10,
            zone_loss_unrest: 5,
            weather: WeatherConfig::default(),
            disruptions: DisruptionConfig::default(),
        }
    }
}

/// Weather roll weights and per-weather effects.
///
/// Weights are relative. `repeat_weight` keeps yesterday's weather.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Relative odds of each weather.
    pub weights: Vec<(Weather, u32)>,
    /// Relative odds that yesterday's weather persists.
    pub repeat_weight: u32,
    /// Siege damage multiplier per weather, as percentages.
    pub siege_pct: Vec<(Weather, u32)>,
    /// Water need multiplier during a heatwave (default: 120%).
    pub heatwave_water_pct: u32,
    /// Fuel need multiplier during frost (default: 150%).
    pub frost_fuel_pct: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            weights: vec![
                (Weather::Clear, 35),
                (Weather::Rain, 15),
                (Weather::Fog, 12),
                (Weather::Storm, 6),
                (Weather::Frost, 10),
                (Weather::Heatwave, 7),
            ],
            repeat_weight: 15,
            siege_pct: vec![
                (Weather::Clear, 100),
                (Weather::Rain, 90),
                (Weather::Fog, 120),
                (Weather::Storm, 60),
                (Weather::Frost, 110),
                (Weather::Heatwave, 100),
            ],
            heatwave_water_pct: 120,
            frost_fuel_pct: 150,
        }
    }
}

impl WeatherConfig {
    /// Siege damage percentage for `weather`. Unlisted weather is 100%.
    pub fn siege_pct(&self, weather: Weather) -> u32 {
        self.siege_pct
            .iter()
            .find(|(kind, _)| *kind == weather)
            .map_or(100, |(_, pct)| *pct)
    }
}

/// Odds and severities of the daily random disruption.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisruptionConfig {
    /// Chance per day that some disruption strikes (default: 10%).
    pub chance_pct: u32,
    /// Farming output under Spoiled Grain (default: 70%).
    pub spoiled_grain_pct: u32,
    /// Fuel gathering output under Damp Kindling (default: 50%).
    pub damp_kindling_pct: u32,
    /// Water drawing output under Silted Well (default: 60%).
    pub silted_well_pct: u32,
    /// Salvage and repair output under Tool Shortage (default: 70%).
    pub tool_shortage_pct: u32,
}

impl Default for DisruptionConfig {
    fn default() -> Self {
        Self {
            chance_pct: 10,
            spoiled_grain_pct: 70,
            damp_kindling_pct: 50,
            silted_well_pct: 60,
            tool_shortage_pct: 70,
        }
    }
}
