//! Performance façade crate: hover, forward flight, and mission analysis for a
//! single-main-rotor helicopter, re-exporting the supporting model crates.

pub mod forward;
pub mod helicopter;
pub mod hover;
pub mod mission;
pub mod state;

pub use facade::*;
pub use rotor_aero as aero;
pub use rotor_atmosphere as atmosphere;
pub use rotor_propulsion as propulsion;

mod facade;
