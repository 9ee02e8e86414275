//! Weather and daily disruptions.
//!
//! Weather is rolled once per day at the start of resolution, followed by
//! the disruption roll. Both draw from the caller's RNG, so the same seed
//! always yields the same sequence.
//!
//! | Weather  | Weight | Siege damage | Other |
//! |----------|--------|--------------|-------|
//! | Clear    | 35     | 100%         |       |
//! | Rain     | 15     | 90%          |       |
//! | Fog      | 12     | 120%         |       |
//! | Storm    | 6      | 60%          |       |
//! | Frost    | 10     | 110%         | fuel need 150% |
//! | Heatwave | 7      | 100%         | water need 120% |
//! | (repeat) | 15     |              | yesterday's weather persists |

use bastion_types::numeric::pct;
use bastion_types::{Disruption, JobKind, ResourceKind, Weather};
use rand::Rng;
use rust_decimal::Decimal;

use crate::config::{DisruptionConfig, WeatherConfig};

/// Roll today's weather.
///
/// A roll landing in the repeat band returns `previous`. Degenerate
/// configurations with no weight fall back to [`Weather::Clear`].
pub fn roll_weather(rng: &mut impl Rng, config: &WeatherConfig, previous: Weather) -> Weather {
    let total = config
        .weights
        .iter()
        .fold(config.repeat_weight, |acc, (_, weight)| acc.saturating_add(*weight));
    if total == 0 {
        return Weather::Clear;
    }
    let roll = rng.random_range(0..total);
    let mut cumulative = 0_u32;
    for (weather, weight) in &config.weights {
        cumulative = cumulative.saturating_add(*weight);
        if roll < cumulative {
            return *weather;
        }
    }
    previous
}

/// Roll today's disruption, if any.
///
/// First a percentage roll against `chance_pct`, then a uniform pick.
pub fn roll_disruption(rng: &mut impl Rng, config: &DisruptionConfig) -> Option<Disruption> {
    let strike = rng.random_range(0..100_u32);
    if strike >= config.chance_pct {
        return None;
    }
    let index = rng.random_range(0..Disruption::ALL.len());
    Disruption::ALL.get(index).copied()
}

/// Jobs slowed by a disruption and the multiplier applied to each.
pub fn disruption_effects(disruption: Disruption, config: &DisruptionConfig) -> Vec<(JobKind, Decimal)> {
    match disruption {
        Disruption::SpoiledGrain => vec![(JobKind::Farming, pct(config.spoiled_grain_pct))],
        Disruption::DampKindling => vec![(JobKind::FuelGathering, pct(config.damp_kindling_pct))],
        Disruption::SiltedWell => vec![(JobKind::WaterDrawing, pct(config.silted_well_pct))],
        Disruption::ToolShortage => vec![
            (JobKind::Salvage, pct(config.tool_shortage_pct)),
            (JobKind::Repair, pct(config.tool_shortage_pct)),
        ],
    }
}

/// Consumption multipliers imposed by the weather.
pub fn weather_need_effects(weather: Weather, config: &WeatherConfig) -> Vec<(ResourceKind, Decimal)> {
    match weather {
        Weather::Heatwave => vec![(ResourceKind::Water, pct(config.heatwave_water_pct))],
        Weather::Frost => vec![(ResourceKind::Fuel, pct(config.frost_fuel_pct))],
        Weather::Clear | Weather::Rain | Weather::Fog | Weather::Storm => Vec::new(),
    }
}

/// Siege damage multiplier for the weather.
pub fn weather_siege_multiplier(weather: Weather, config: &WeatherConfig) -> Decimal {
    pct(config.siege_pct(weather))
}
