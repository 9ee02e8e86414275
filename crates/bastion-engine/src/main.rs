//! Headless driver for the Bastion siege simulation.
//!
//! Loads configuration, builds the engine and a fresh game, and plays the
//! run to its end with an even-spread allocator and no player actions.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `bastion-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing) from the `logging` section
//! 3. Build the engine and its rule catalog
//! 4. Seed the starting state
//! 5. Run the day loop until the run has an outcome
//! 6. Log the result

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bastion_core::config::{LogFormat, LoggingConfig};
use bastion_core::decision::{DefaultResponder, EvenSpreadAllocator, IdleActionSource};
use bastion_core::runner::{self, NoOpCallback};
use bastion_core::{Engine, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "bastion-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the catalog
/// does not build, or the run stops without an outcome.
fn main() -> Result<()> {
    // 1. Load configuration. Logging is not up yet, so report where it
    //    came from once the subscriber is installed.
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let (config, from_file) = load_config(&path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("bastion-engine starting");
    if from_file {
        info!(path = %path.display(), "Configuration loaded");
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
    }
    info!(
        seed = config.run.seed,
        target_day = config.run.target_day,
        allocation_step = config.run.allocation_step,
        "Run parameters"
    );

    // 3. Build the engine.
    let engine = Engine::standard(config).context("failed to build the rule catalog")?;
    info!(
        laws = engine.catalog().laws().len(),
        orders = engine.catalog().orders().len(),
        missions = engine.catalog().missions().len(),
        events = engine.catalog().events().len(),
        "Catalog loaded"
    );

    // 4. Seed the starting state.
    let mut state = engine
        .new_game()
        .context("starting configuration is invalid")?;
    info!(
        population = state.population.total(),
        zones = state.perimeter.zones().len(),
        "Starting state seeded, entering day loop"
    );

    // 5. Run the simulation.
    let summary = runner::run_to_end(
        &engine,
        &mut state,
        &mut IdleActionSource,
        &mut EvenSpreadAllocator,
        &mut DefaultResponder,
        &mut NoOpCallback,
    )
    .context("run aborted")?;

    // 6. Log results. `run_to_end` has already logged the digest.
    info!(
        outcome = ?summary.outcome,
        last_day = summary.last_day,
        "bastion-engine shutdown complete"
    );

    Ok(())
}

/// Read the configuration file, falling back to defaults when it is missing.
///
/// The flag in the result is `true` when the file was read.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool)> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok((config, true))
    } else {
        let mut config = SimulationConfig::default();
        config.run.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
