//! Core units, constants, and shared primitives for the rotorcraft performance workspace.
//!
//! Everything downstream works in US customary units: feet, pounds, slugs, degrees
//! Rankine, knots, and horsepower.

/// Physical constants expressed in US customary units (unless stated otherwise).
pub mod constants {
    /// Foot-pounds per second in one horsepower.
    pub const FT_LB_S_PER_HP: f64 = 550.0;
    /// Ratio of specific heats for dry air.
    pub const GAMMA_AIR: f64 = 1.4;
    /// Specific gas constant for dry air (ft·lbf/(slug·°R)).
    pub const R_AIR_IMPERIAL: f64 = 1716.49;
    /// Sea-level standard density (slug/ft³).
    pub const RHO_SEA_LEVEL_SLUG_FT3: f64 = 0.002_376_892;
    /// Minutes per hour.
    pub const MINUTES_PER_HOUR: f64 = 60.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Feet per second in one knot.
    pub const FT_S_PER_KNOT: f64 = 1.687_81;
    /// Feet per metre.
    pub const FT_PER_M: f64 = 3.280_84;
    /// Density conversion: kg/m³ per slug/ft³.
    pub const KG_M3_PER_SLUG_FT3: f64 = 515.378_818;
    /// Pascals per pound-force per square foot.
    pub const PA_PER_PSF: f64 = 47.880_26;

    /// Convert knots to feet per second.
    #[inline]
    pub fn knots_to_ft_s(v: f64) -> f64 {
        v * FT_S_PER_KNOT
    }

    /// Convert feet to metres.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v / FT_PER_M
    }

    /// Convert Kelvin to degrees Rankine.
    #[inline]
    pub fn kelvin_to_rankine(t: f64) -> f64 {
        t * 1.8
    }

    /// Convert feet per minute to feet per second.
    #[inline]
    pub fn fpm_to_ft_s(v: f64) -> f64 {
        v / 60.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::MINUTES_PER_HOUR;

    /// Convert minutes to hours.
    #[inline]
    pub fn minutes_to_hours(minutes: f64) -> f64 {
        minutes / MINUTES_PER_HOUR
    }
}
