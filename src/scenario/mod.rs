//! A scenario pairs a vehicle from a catalog with a mission profile file.

use std::path::Path;

use rotor_atmosphere::StandardAtmosphere;
use rotor_config::ConfigError;
use rotor_performance::{
    Helicopter, Maneuver, MissionError, MissionOptions, MissionReport, PerformanceError,
    fly_mission, maneuvers_from_records,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Performance(#[from] PerformanceError),
    #[error(transparent)]
    Mission(#[from] MissionError),
}

/// A ready-to-fly vehicle and its mission.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub helicopter: Helicopter,
    pub maneuvers: Vec<Maneuver>,
}

impl Scenario {
    /// Load the vehicle (by name, or the first in the catalog) and the mission records.
    pub fn load<V: AsRef<Path>, M: AsRef<Path>>(
        vehicles: V,
        vehicle_name: Option<&str>,
        mission: M,
    ) -> Result<Self, ScenarioError> {
        let config = rotor_config::load_vehicle_config(vehicles, vehicle_name)?;
        let helicopter = Helicopter::new(config)?;
        let records = rotor_config::load_mission(mission)?;
        let maneuvers = maneuvers_from_records(&records)?;
        Ok(Self {
            helicopter,
            maneuvers,
        })
    }

    /// Fly the mission through the standard atmosphere, consuming fuel from the vehicle.
    pub fn fly(&mut self, options: &MissionOptions) -> Result<MissionReport, ScenarioError> {
        Ok(fly_mission(
            &mut self.helicopter,
            &self.maneuvers,
            &StandardAtmosphere,
            options,
        )?)
    }
}
