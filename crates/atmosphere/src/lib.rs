//! Standard-atmosphere provider returning ambient conditions in US customary units.
//!
//! The performance engine only needs density ratio, density, temperature, and speed of
//! sound at a pressure altitude. [`StandardAtmosphere`] implements the 1976 US standard
//! atmosphere up to its 86 km ceiling; anything outside the tabulated band is reported
//! as an error instead of being extrapolated.

use rotor_core::constants::{GAMMA_AIR, R_AIR_IMPERIAL, RHO_SEA_LEVEL_SLUG_FT3};
use rotor_core::units::{KG_M3_PER_SLUG_FT3, PA_PER_PSF, ft_to_m, kelvin_to_rankine};
use serde::Serialize;
use thiserror::Error;

const EARTH_RADIUS_M: f64 = 6_356_766.0;
const G0_M_S2: f64 = 9.806_65;
const R_AIR_SI: f64 = 287.052_87;
const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
/// Top of the last geopotential layer (m').
const GEOPOTENTIAL_CEILING_M: f64 = 84_852.0;

/// Lowest altitude accepted by the standard model (ft).
pub const MIN_ALTITUDE_FT: f64 = -2_000.0;
/// Geometric ceiling of the standard model (ft), 86 km.
pub const MAX_ALTITUDE_FT: f64 = 282_152.2;

#[derive(Debug, Clone, Copy)]
struct Layer {
    base_geopotential_m: f64,
    base_temperature_k: f64,
    lapse_rate_k_m: f64,
}

const LAYERS: &[Layer] = &[
    Layer {
        base_geopotential_m: 0.0,
        base_temperature_k: 288.15,
        lapse_rate_k_m: -0.0065,
    },
    Layer {
        base_geopotential_m: 11_000.0,
        base_temperature_k: 216.65,
        lapse_rate_k_m: 0.0,
    },
    Layer {
        base_geopotential_m: 20_000.0,
        base_temperature_k: 216.65,
        lapse_rate_k_m: 0.001,
    },
    Layer {
        base_geopotential_m: 32_000.0,
        base_temperature_k: 228.65,
        lapse_rate_k_m: 0.0028,
    },
    Layer {
        base_geopotential_m: 47_000.0,
        base_temperature_k: 270.65,
        lapse_rate_k_m: 0.0,
    },
    Layer {
        base_geopotential_m: 51_000.0,
        base_temperature_k: 270.65,
        lapse_rate_k_m: -0.0028,
    },
    Layer {
        base_geopotential_m: 71_000.0,
        base_temperature_k: 214.65,
        lapse_rate_k_m: -0.002,
    },
];

/// Ambient conditions at one altitude. Produced fresh per query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericPoint {
    pub altitude_ft: f64,
    pub density_ratio: f64,
    pub density_slug_ft3: f64,
    pub temperature_r: f64,
    pub pressure_psf: f64,
    pub speed_of_sound_ft_s: f64,
}

impl AtmosphericPoint {
    /// Build a point from raw density and temperature, deriving σ and the speed of sound.
    pub fn from_state(
        altitude_ft: f64,
        density_slug_ft3: f64,
        temperature_r: f64,
        pressure_psf: f64,
    ) -> Self {
        Self {
            altitude_ft,
            density_ratio: density_slug_ft3 / RHO_SEA_LEVEL_SLUG_FT3,
            density_slug_ft3,
            temperature_r,
            pressure_psf,
            speed_of_sound_ft_s: (GAMMA_AIR * R_AIR_IMPERIAL * temperature_r).sqrt(),
        }
    }

    /// Standard sea-level conditions.
    pub fn sea_level() -> Self {
        Self::from_state(
            0.0,
            RHO_SEA_LEVEL_SLUG_FT3,
            kelvin_to_rankine(288.15),
            SEA_LEVEL_PRESSURE_PA / PA_PER_PSF,
        )
    }
}

/// Errors surfaced by atmosphere providers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AtmosphereError {
    #[error("altitude {altitude_ft} ft lies outside the model range [{min_ft}, {max_ft}] ft")]
    OutOfRange {
        altitude_ft: f64,
        min_ft: f64,
        max_ft: f64,
    },
}

/// Source of ambient conditions for the performance engine.
pub trait AtmosphereProvider {
    /// Ambient conditions at the given pressure altitude (ft).
    fn at(&self, altitude_ft: f64) -> Result<AtmosphericPoint, AtmosphereError>;
}

/// 1976 US standard atmosphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAtmosphere;

impl AtmosphereProvider for StandardAtmosphere {
    fn at(&self, altitude_ft: f64) -> Result<AtmosphericPoint, AtmosphereError> {
        if !altitude_ft.is_finite() || !(MIN_ALTITUDE_FT..=MAX_ALTITUDE_FT).contains(&altitude_ft)
        {
            return Err(AtmosphereError::OutOfRange {
                altitude_ft,
                min_ft: MIN_ALTITUDE_FT,
                max_ft: MAX_ALTITUDE_FT,
            });
        }

        let (temperature_k, pressure_pa) = standard_conditions_si(ft_to_m(altitude_ft));
        let density_kg_m3 = pressure_pa / (R_AIR_SI * temperature_k);

        Ok(AtmosphericPoint::from_state(
            altitude_ft,
            density_kg_m3 / KG_M3_PER_SLUG_FT3,
            kelvin_to_rankine(temperature_k),
            pressure_pa / PA_PER_PSF,
        ))
    }
}

/// Convenience wrapper around [`StandardAtmosphere`].
pub fn standard(altitude_ft: f64) -> Result<AtmosphericPoint, AtmosphereError> {
    StandardAtmosphere.at(altitude_ft)
}

/// Temperature (K) and pressure (Pa) at a geometric altitude (m).
fn standard_conditions_si(geometric_m: f64) -> (f64, f64) {
    let h = (EARTH_RADIUS_M * geometric_m / (EARTH_RADIUS_M + geometric_m))
        .min(GEOPOTENTIAL_CEILING_M);

    let mut pressure = SEA_LEVEL_PRESSURE_PA;
    for (idx, layer) in LAYERS.iter().enumerate() {
        let top = LAYERS
            .get(idx + 1)
            .map(|next| next.base_geopotential_m)
            .unwrap_or(GEOPOTENTIAL_CEILING_M);
        let is_last = idx + 1 == LAYERS.len();
        let dh = if is_last { h } else { h.min(top) } - layer.base_geopotential_m;

        let (temperature, layer_pressure) = if layer.lapse_rate_k_m == 0.0 {
            let t = layer.base_temperature_k;
            (t, pressure * (-G0_M_S2 * dh / (R_AIR_SI * t)).exp())
        } else {
            let t = layer.base_temperature_k + layer.lapse_rate_k_m * dh;
            let exponent = -G0_M_S2 / (layer.lapse_rate_k_m * R_AIR_SI);
            (t, pressure * (t / layer.base_temperature_k).powf(exponent))
        };

        // below the base of the first layer the troposphere lapse rate still applies
        if h <= top || is_last {
            return (temperature, layer_pressure);
        }
        pressure = layer_pressure;
    }

    (LAYERS[0].base_temperature_k, SEA_LEVEL_PRESSURE_PA)
}
