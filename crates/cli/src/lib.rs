//! Shared plumbing for the command-line binaries.

use std::path::PathBuf;

use clap::Args;
use rotor_performance_calculator::atmosphere::{
    AtmosphereProvider, AtmosphericPoint, StandardAtmosphere,
};
use rotor_performance_calculator::config::{self, VehicleConfig};
use rotor_performance_calculator::performance::Helicopter;
use tracing_subscriber::EnvFilter;

/// Vehicle selection flags common to every binary.
#[derive(Debug, Args)]
pub struct VehicleArgs {
    /// Vehicle catalog: YAML/TOML file or directory of TOML files
    #[arg(long, default_value = "configs/vehicles")]
    pub config: PathBuf,

    /// Vehicle name within the catalog (defaults to the first entry)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl VehicleArgs {
    pub fn load_config(&self) -> anyhow::Result<VehicleConfig> {
        Ok(config::load_vehicle_config(&self.config, self.vehicle.as_deref())?)
    }

    pub fn load_helicopter(&self) -> anyhow::Result<Helicopter> {
        Ok(Helicopter::new(self.load_config()?)?)
    }
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Standard-atmosphere conditions at a pressure altitude.
pub fn ambient(altitude_ft: f64) -> anyhow::Result<AtmosphericPoint> {
    Ok(StandardAtmosphere.at(altitude_ft)?)
}
