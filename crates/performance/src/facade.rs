//! Re-exported APIs for consumers of the performance crate.

pub use crate::forward::{Airspeeds, ForwardFlightOptions, ForwardFlightRow, ForwardFlightTable};
pub use crate::helicopter::{Helicopter, PerformanceError};
pub use crate::hover::{GroundEffect, HoverOptions, HoverRecord};
pub use crate::mission::{
    Maneuver, MissionError, MissionOptions, MissionReport, SegmentReport, fly_mission,
    maneuvers_from_records,
};
pub use crate::state::{StateError, VehicleState};
pub use rotor_aero::DragPolar;
pub use rotor_propulsion::{PerformanceWarning, PowerPlant, Rating, Regime};

pub mod vehicle {
    use std::path::Path;

    use rotor_config::ConfigError;
    use thiserror::Error;

    use crate::helicopter::{Helicopter, PerformanceError};

    /// Errors surfaced when loading a helicopter from a catalog.
    #[derive(Debug, Error)]
    pub enum VehicleError {
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Performance(#[from] PerformanceError),
    }

    /// Load a vehicle catalog and build the named (or first) helicopter.
    pub fn load<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<Helicopter, VehicleError> {
        let config = rotor_config::load_vehicle_config(path, name)?;
        Ok(Helicopter::new(config)?)
    }
}
