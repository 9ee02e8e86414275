//! Configuration loading and typed config structures for a siege run.
//!
//! The canonical configuration lives in `bastion-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard scenario.
//!
//! Percentages are whole numbers (`*_pct`) and become `Decimal`
//! multipliers only inside the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use bastion_people::{HealthConfig, JobSpec, MoraleConfig, PopulationSeed, ZonePenalty, default_jobs};
use bastion_types::ResourceKind;
use bastion_world::{Perimeter, SiegeConfig, WorldError, ZoneSpec, default_zones};
use serde::Deserialize;
use tracing::warn;

/// Environment variable that replaces `run.seed`.
pub const SEED_ENV: &str = "BASTION_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The zone layout cannot form a perimeter.
    #[error("invalid zone layout: {source}")]
    Layout {
        /// The underlying layout error.
        #[from]
        source: WorldError,
    },

    /// A value parsed but makes no sense.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `bastion-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Seed, length, and action pacing.
    #[serde(default)]
    pub run: RunConfig,

    /// Day-one stockpile, population, stats, and zones.
    #[serde(default)]
    pub starting: StartingConfig,

    /// Jobs, zone penalties, and per-person needs.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Deficit, starvation, and overcrowding penalties.
    #[serde(default)]
    pub penalties: PenaltyConfig,

    /// Sickness and recovery.
    #[serde(default)]
    pub health: HealthConfig,

    /// Unrest and morale drift.
    #[serde(default)]
    pub morale: MoraleConfig,

    /// Siege pressure, weather, and disruptions.
    #[serde(default)]
    pub siege: SiegeConfig,

    /// Loss thresholds.
    #[serde(default)]
    pub outcome: OutcomeConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `BASTION_SEED` overrides `run.seed` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, and
    /// [`ConfigError::Invalid`] or [`ConfigError::Layout`] if validation
    /// fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.run.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero target day, zero
    /// allocation step, zero overcrowding threshold, or a duplicated job,
    /// and [`ConfigError::Layout`] if the zones do not form a perimeter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.target_day == 0 {
            return Err(invalid("run.target_day must be at least 1"));
        }
        if self.run.allocation_step == 0 {
            return Err(invalid("run.allocation_step must be at least 1"));
        }
        if self.penalties.overcrowding_threshold == 0 {
            return Err(invalid("penalties.overcrowding_threshold must be at least 1"));
        }
        if self.penalties.starvation_divisor == 0 {
            return Err(invalid("penalties.starvation_divisor must be at least 1"));
        }
        let mut seen = BTreeSet::new();
        for spec in &self.economy.jobs {
            if !seen.insert(spec.job) {
                return Err(invalid(format!("economy.jobs lists {} twice", spec.job)));
            }
        }
        Perimeter::from_specs(&self.starting.zones)?;
        Ok(())
    }

    /// Look up the definition of a job.
    pub fn job(&self, job: bastion_types::JobKind) -> Option<&JobSpec> {
        self.economy.jobs.iter().find(|spec| spec.job == job)
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Seed, length, and action pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Survive through this day to win.
    #[serde(default = "default_target_day")]
    pub target_day: u32,

    /// Days that must pass after enacting a law before the next one.
    #[serde(default = "default_law_cooldown_days")]
    pub law_cooldown_days: u32,

    /// Job counts must be multiples of this.
    #[serde(default = "default_allocation_step")]
    pub allocation_step: u32,
}

impl RunConfig {
    /// Replace the seed with `BASTION_SEED` when it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV) {
            match val.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(_) => warn!(value = %val, "ignoring {SEED_ENV}: not an unsigned integer"),
            }
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            target_day: default_target_day(),
            law_cooldown_days: default_law_cooldown_days(),
            allocation_step: default_allocation_step(),
        }
    }
}

/// The state of the settlement on day one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartingConfig {
    /// Opening stockpile. Unlisted resources start at zero.
    #[serde(default = "default_resources")]
    pub resources: BTreeMap<ResourceKind, u32>,

    /// Opening head counts.
    #[serde(default)]
    pub population: PopulationSeed,

    /// Opening morale.
    #[serde(default = "default_morale")]
    pub morale: u32,

    /// Opening unrest.
    #[serde(default = "default_unrest")]
    pub unrest: u32,

    /// Opening sickness.
    #[serde(default = "default_sickness")]
    pub sickness: u32,

    /// Zones, outermost first. The Keep must come last.
    #[serde(default = "default_zones")]
    pub zones: Vec<ZoneSpec>,
}

impl Default for StartingConfig {
    fn default() -> Self {
        Self {
            resources: default_resources(),
            population: PopulationSeed::default(),
            morale: default_morale(),
            unrest: default_unrest(),
            sickness: default_sickness(),
            zones: default_zones(),
        }
    }
}

/// Jobs and daily needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Job table. Jobs left out cannot be staffed.
    #[serde(default = "default_jobs")]
    pub jobs: Vec<JobSpec>,

    /// Output penalties for lost or quarantined home zones.
    #[serde(default)]
    pub zone_penalty: ZonePenalty,

    /// Per-person daily need as a percentage of one unit.
    #[serde(default = "default_consumption_pct")]
    pub consumption_pct: BTreeMap<ResourceKind, u32>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            zone_penalty: ZonePenalty::default(),
            consumption_pct: default_consumption_pct(),
        }
    }
}

/// Stat changes applied on a day a resource ran short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeficitPenalty {
    /// Unrest gained.
    #[serde(default)]
    pub unrest: u32,
    /// Morale lost.
    #[serde(default)]
    pub morale: u32,
    /// Sickness gained.
    #[serde(default)]
    pub sickness: u32,
}

/// Deficit, starvation, and overcrowding penalties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PenaltyConfig {
    /// Per-resource deficit penalties.
    #[serde(default = "default_deficits")]
    pub deficits: BTreeMap<ResourceKind, DeficitPenalty>,

    /// Consecutive food-deficit days before people starve.
    #[serde(default = "default_starvation_grace_days")]
    pub starvation_grace_days: u32,

    /// Units of food shortfall per starvation death, rounded up.
    #[serde(default = "default_starvation_divisor")]
    pub starvation_divisor: u32,

    /// Residents over capacity per overcrowding stack.
    #[serde(default = "default_overcrowding_threshold")]
    pub overcrowding_threshold: u32,

    /// Unrest per overcrowding stack.
    #[serde(default = "default_overcrowding_unrest")]
    pub overcrowding_unrest: u32,

    /// Sickness per overcrowding stack.
    #[serde(default = "default_overcrowding_sickness")]
    pub overcrowding_sickness: u32,

    /// Extra food and water need per stack, in percent.
    #[serde(default = "default_overcrowding_surcharge_pct")]
    pub overcrowding_surcharge_pct: u32,
}

impl PenaltyConfig {
    /// Penalty for running short of `resource`, if any.
    pub fn deficit(&self, resource: ResourceKind) -> Option<DeficitPenalty> {
        self.deficits.get(&resource).copied()
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            deficits: default_deficits(),
            starvation_grace_days: default_starvation_grace_days(),
            starvation_divisor: default_starvation_divisor(),
            overcrowding_threshold: default_overcrowding_threshold(),
            overcrowding_unrest: default_overcrowding_unrest(),
            overcrowding_sickness: default_overcrowding_sickness(),
            overcrowding_surcharge_pct: default_overcrowding_surcharge_pct(),
        }
    }
}

/// Loss thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutcomeConfig {
    /// Unrest at or above which the people revolt.
    #[serde(default = "default_revolt_unrest")]
    pub revolt_unrest: u32,

    /// Consecutive days with food and water both at zero before collapse.
    #[serde(default = "default_collapse_days")]
    pub collapse_days: u32,

    /// Sickness at or above which a sick majority ends the run.
    #[serde(default = "default_pandemic_sickness")]
    pub pandemic_sickness: u32,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            revolt_unrest: default_revolt_unrest(),
            collapse_days: default_collapse_days(),
            pandemic_sickness: default_pandemic_sickness(),
        }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output style.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_target_day() -> u32 {
    40
}

const fn default_law_cooldown_days() -> u32 {
    3
}

const fn default_allocation_step() -> u32 {
    1
}

fn default_resources() -> BTreeMap<ResourceKind, u32> {
    BTreeMap::from([
        (ResourceKind::Food, 300),
        (ResourceKind::Water, 300),
        (ResourceKind::Fuel, 150),
        (ResourceKind::Medicine, 40),
        (ResourceKind::Materials, 120),
    ])
}

const fn default_morale() -> u32 {
    60
}

const fn default_unrest() -> u32 {
    15
}

const fn default_sickness() -> u32 {
    10
}

fn default_consumption_pct() -> BTreeMap<ResourceKind, u32> {
    BTreeMap::from([
        (ResourceKind::Food, 100),
        (ResourceKind::Water, 100),
        (ResourceKind::Fuel, 20),
    ])
}

fn default_deficits() -> BTreeMap<ResourceKind, DeficitPenalty> {
    BTreeMap::from([
        (
            ResourceKind::Food,
            DeficitPenalty {
                unrest: 5,
                morale: 4,
                sickness: 2,
            },
        ),
        (
            ResourceKind::Water,
            DeficitPenalty {
                unrest: 6,
                morale: 5,
                sickness: 4,
            },
        ),
        (
            ResourceKind::Fuel,
            DeficitPenalty {
                unrest: 2,
                morale: 3,
                sickness: 2,
            },
        ),
    ])
}

const fn default_starvation_grace_days() -> u32 {
    3
}

const fn default_starvation_divisor() -> u32 {
    10
}

const fn default_overcrowding_threshold() -> u32 {
    10
}

const fn default_overcrowding_unrest() -> u32 {
    2
}

const fn default_overcrowding_sickness() -> u32 {
    1
}

const fn default_overcrowding_surcharge_pct() -> u32 {
    10
}

const fn default_revolt_unrest() -> u32 {
    85
}

const fn default_collapse_days() -> u32 {
    2
}

const fn default_pandemic_sickness() -> u32 {
    90
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bastion_types::{JobKind, ZoneId};

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run.seed, 42);
        assert_eq!(config.run.target_day, 40);
        assert_eq!(config.starting.resources.get(&ResourceKind::Food), Some(&300));
        assert_eq!(config.starting.zones.len(), 5);
        assert_eq!(config.economy.jobs.len(), 7);
        assert_eq!(config.outcome.revolt_unrest, 85);
    }

    #[test]
    fn parse_empty_yaml_gives_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        let defaults = SimulationConfig::default();
        assert_eq!(config.starting, defaults.starting);
        assert_eq!(config.economy, defaults.economy);
        assert_eq!(config.penalties, defaults.penalties);
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
run:
  target_day: 25
starting:
  resources:
    food: 50
    water: 80
  unrest: 40
penalties:
  overcrowding_threshold: 5
health:
  recovery_enabled: false
siege:
  base_damage: 6
logging:
  level: debug
  format: json
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.run.target_day, 25);
        assert_eq!(config.run.law_cooldown_days, 3);
        assert_eq!(config.starting.resources.get(&ResourceKind::Food), Some(&50));
        assert_eq!(config.starting.resources.get(&ResourceKind::Fuel), None);
        assert_eq!(config.starting.unrest, 40);
        assert_eq!(config.starting.morale, 60);
        assert_eq!(config.penalties.overcrowding_threshold, 5);
        assert_eq!(config.penalties.starvation_grace_days, 3);
        assert!(!config.health.recovery_enabled);
        assert_eq!(config.health.recovery_threshold, 70);
        assert_eq!(config.siege.base_damage, 6);
        assert_eq!(config.siege.escalation_interval_days, 7);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let yaml = include_str!("../../../bastion-config.yaml");
        let mut config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        config.run.seed = default_seed();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn deficit_penalties_by_resource() {
        let config = PenaltyConfig::default();
        let water = config.deficit(ResourceKind::Water).unwrap();
        assert_eq!((water.unrest, water.morale, water.sickness), (6, 5, 4));
        assert!(config.deficit(ResourceKind::Medicine).is_none());
    }

    #[test]
    fn zero_target_day_is_rejected() {
        let result = SimulationConfig::parse("run:\n  target_day: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_overcrowding_threshold_is_rejected() {
        let mut config = SimulationConfig::default();
        config.penalties.overcrowding_threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn keep_must_be_innermost() {
        let mut config = SimulationConfig::default();
        config.starting.zones.reverse();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Layout {
                source: WorldError::KeepNotInnermost
            })
        ));
        config.starting.zones.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Layout {
                source: WorldError::EmptyLayout
            })
        ));
    }

    #[test]
    fn duplicate_job_is_rejected() {
        let mut config = SimulationConfig::default();
        let farming = config.job(JobKind::Farming).cloned().unwrap();
        config.economy.jobs.push(farming);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn job_lookup() {
        let config = SimulationConfig::default();
        assert_eq!(config.job(JobKind::Repair).unwrap().home_zone, ZoneId::Keep);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("run: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
