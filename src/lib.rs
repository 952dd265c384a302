//! Rotorcraft performance calculator.
//!
//! The model crates live under `crates/` and are re-exported here so front-ends (the
//! CLI binaries, notebooks, tests) depend on a single library.

pub mod scenario;

pub use rotor_aero as aero;
pub use rotor_atmosphere as atmosphere;
pub use rotor_config as config;
pub use rotor_core as base;
pub use rotor_export as export;
pub use rotor_performance as performance;
pub use rotor_propulsion as propulsion;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
