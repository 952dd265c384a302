//! Glauert forward-flight induced velocity.
//!
//! Momentum balance in edgewise flight gives `v·√(V² + v²) = v₀²`, with `v₀` the hover
//! induced velocity at the same thrust. Squaring yields the quadratic-in-`v²` form
//! `v⁴ + V²v² − v₀⁴ = 0`, solved here by Newton iteration from `v₀`.

use crate::AeroError;

const MAX_ITERATIONS: usize = 50;
const RELATIVE_TOLERANCE: f64 = 1e-10;

/// Induced velocity (ft/s) at `airspeed` (ft/s) for hover induced velocity `v0` (ft/s).
pub fn glauert_inflow(v0: f64, airspeed: f64) -> Result<f64, AeroError> {
    if !v0.is_finite() || !airspeed.is_finite() {
        return Err(AeroError::ConvergenceFailure {
            iterations: 0,
            residual: f64::NAN,
        });
    }
    if v0 == 0.0 {
        return Ok(0.0);
    }

    let v0 = v0.abs();
    let v2 = airspeed.powi(2);
    let target = v0.powi(4);
    let tolerance = RELATIVE_TOLERANCE * v0.max(1.0);
    let residual = |v: f64| v.powi(4) + v2 * v.powi(2) - target;

    // f is convex and increasing for v > 0 with f(v0) >= 0, so Newton from v0 descends
    // monotonically onto the root.
    let mut v = v0;
    for iteration in 1..=MAX_ITERATIONS {
        let slope = 4.0 * v.powi(3) + 2.0 * v2 * v;
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        let step = residual(v) / slope;
        v -= step;
        if step.abs() <= tolerance {
            tracing::debug!(iterations = iteration, v, "glauert inflow converged");
            return Ok(v);
        }
    }

    Err(AeroError::ConvergenceFailure {
        iterations: MAX_ITERATIONS,
        residual: residual(v),
    })
}

/// Closed-form root of the same balance, kept as an independent check.
pub fn glauert_closed_form(v0: f64, airspeed: f64) -> f64 {
    if v0 == 0.0 {
        return 0.0;
    }
    let ratio = airspeed / v0;
    v0 * (-0.5 * ratio.powi(2) + (ratio.powi(4) / 4.0 + 1.0).sqrt()).sqrt()
}
