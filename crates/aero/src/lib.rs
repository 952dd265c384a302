//! Rotor aerodynamics: momentum-theory hover torque, tail-rotor power, Glauert
//! forward-flight inflow, and forward-flight profile drag build-up.
//!
//! All functions are pure. Rotor geometry comes from [`rotor_config::RotorConfig`];
//! ambient density and speed of sound are passed in by the caller.

use std::f64::consts::PI;

use thiserror::Error;

pub mod forward;
pub mod glauert;
pub mod hover;

pub use forward::{FlightCondition, ProfileDrag, forward_profile_power_hp, profile_drag};
pub use glauert::{glauert_closed_form, glauert_inflow};
pub use hover::{DragPolar, HoverTorque, TailRotorPower, hover_torque, tail_rotor_hover};

/// Fraction of the radius at which the hover tip Mach number is evaluated.
pub const MACH_REFERENCE_STATION: f64 = 0.8;

/// Errors raised by the aerodynamic solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AeroError {
    #[error("Glauert inflow did not converge after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailure { iterations: usize, residual: f64 },
    #[error("invalid aerodynamic input: {0}")]
    InvalidInput(&'static str),
}

/// Thrust coefficient `T / (ρ·A·Vtip²)`.
pub fn thrust_coefficient(thrust_lb: f64, density: f64, disk_area_ft2: f64, tip_speed: f64) -> f64 {
    thrust_lb / (density * disk_area_ft2 * tip_speed.powi(2))
}

/// Prandtl tip-loss factor `B = 1 − √(2Ct)/b`.
pub fn tip_loss_factor(thrust_coefficient: f64, blade_count: u32) -> Result<f64, AeroError> {
    if !(thrust_coefficient >= 0.0) {
        return Err(AeroError::InvalidInput("thrust coefficient must be non-negative"));
    }
    let b = 1.0 - (2.0 * thrust_coefficient).sqrt() / blade_count as f64;
    if b <= 0.0 {
        return Err(AeroError::InvalidInput("rotor loading leaves no effective disk"));
    }
    Ok(b)
}

/// Finite-span lift-curve slope (per rad) from the 2-D value of 2π.
pub fn lift_curve_slope(aspect_ratio: f64) -> f64 {
    let a0 = 2.0 * PI;
    a0 / (1.0 + a0 / (PI * aspect_ratio))
}

/// Section drag coefficient corrected for compressibility at 80 % radius.
pub fn compressible_profile_drag(cd0: f64, tip_speed: f64, speed_of_sound: f64) -> f64 {
    let mach = MACH_REFERENCE_STATION * tip_speed / speed_of_sound;
    cd0 / (mach.powi(2) - 1.0).abs().sqrt()
}

/// Uniform momentum-theory induced velocity with tip loss (ft/s).
pub fn hover_induced_velocity(
    thrust_lb: f64,
    density: f64,
    radius_ft: f64,
    tip_loss: f64,
) -> f64 {
    (thrust_lb / (2.0 * density * PI * radius_ft.powi(2) * tip_loss.powi(2))).sqrt()
}
