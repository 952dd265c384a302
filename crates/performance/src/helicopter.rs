//! The analysed vehicle: immutable configuration, engine model, and mutable weight state.

use rotor_aero::AeroError;
use rotor_atmosphere::{AtmosphereError, AtmosphericPoint};
use rotor_config::VehicleConfig;
use rotor_propulsion::{PerformanceWarning, PowerPlant, Rating};
use thiserror::Error;

use crate::forward::{Airspeeds, ForwardFlightOptions, ForwardFlightTable};
use crate::hover::{GroundEffect, HoverOptions, HoverRecord};
use crate::state::{StateError, VehicleState};

/// Validated band for the induced-power factor.
pub const INDUCED_FACTOR_RANGE: (f64, f64) = (1.0, 1.15);
/// Blade loading above which retreating-blade stall is expected.
pub const BLADE_LOADING_LIMIT: f64 = 0.12;

/// Errors raised by performance analyses.
#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Atmosphere(#[from] AtmosphereError),
    #[error(transparent)]
    Aero(#[from] AeroError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// A single-main-rotor helicopter ready for analysis.
#[derive(Debug, Clone)]
pub struct Helicopter {
    config: VehicleConfig,
    engine: PowerPlant,
    state: VehicleState,
}

impl Helicopter {
    /// Build from a configuration, seeding the weight state from its loading section.
    pub fn new(config: VehicleConfig) -> Result<Self, PerformanceError> {
        let state = VehicleState::from_loading(&config.loading)?;
        Self::with_state(config, state)
    }

    pub fn with_state(config: VehicleConfig, state: VehicleState) -> Result<Self, PerformanceError> {
        config
            .validate()
            .map_err(|err| PerformanceError::InvalidConfiguration(err.to_string()))?;
        let engine = PowerPlant::new(config.engine.clone());
        Ok(Self {
            config,
            engine,
            state,
        })
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn engine(&self) -> &PowerPlant {
        &self.engine
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut VehicleState {
        &mut self.state
    }

    pub fn gross_weight_lb(&self) -> f64 {
        self.state.gross_weight_lb()
    }

    pub fn burn(&mut self, fuel_lb: f64) -> Result<(), StateError> {
        self.state.burn(fuel_lb)
    }

    pub fn unload(&mut self, payload_lb: f64) -> Result<(), StateError> {
        self.state.unload(payload_lb)
    }

    /// Ground-idle fuel flow (lb/hr).
    pub fn idle_fuel_flow(&self) -> f64 {
        self.engine.idle_fuel_flow()
    }

    /// Fuel flow (lb/hr) at a fixed engine rating.
    pub fn rating_fuel_flow(&self, rating: Rating) -> f64 {
        self.engine.rating_fuel_flow(rating)
    }

    pub fn hover(
        &self,
        atmosphere: &AtmosphericPoint,
        options: &HoverOptions,
    ) -> Result<HoverRecord, PerformanceError> {
        crate::hover::solve(self, atmosphere, options)
    }

    pub fn hover_out_of_ground_effect(
        &self,
        atmosphere: &AtmosphericPoint,
    ) -> Result<HoverRecord, PerformanceError> {
        self.hover(atmosphere, &HoverOptions::default())
    }

    pub fn hover_in_ground_effect(
        &self,
        atmosphere: &AtmosphericPoint,
    ) -> Result<HoverRecord, PerformanceError> {
        let options = HoverOptions {
            ground_effect: GroundEffect::InGroundEffect,
            ..HoverOptions::default()
        };
        self.hover(atmosphere, &options)
    }

    pub fn forward_flight(
        &self,
        atmosphere: &AtmosphericPoint,
        airspeeds: impl Into<Airspeeds>,
        options: &ForwardFlightOptions,
    ) -> Result<ForwardFlightTable, PerformanceError> {
        crate::forward::solve(self, atmosphere, &airspeeds.into(), options)
    }

    /// Reject conditions under which the analyses are undefined.
    pub(crate) fn check_conditions(
        &self,
        atmosphere: &AtmosphericPoint,
    ) -> Result<(), PerformanceError> {
        let gross = self.gross_weight_lb();
        if !(gross.is_finite() && gross > 0.0) {
            return Err(PerformanceError::InvalidConfiguration(format!(
                "gross weight must be positive, got {gross}"
            )));
        }
        if !(atmosphere.density_ratio > 0.0 && atmosphere.density_slug_ft3 > 0.0) {
            return Err(PerformanceError::InvalidConfiguration(format!(
                "density ratio must be positive, got {}",
                atmosphere.density_ratio
            )));
        }
        for (name, rotor) in [
            ("main rotor", &self.config.main_rotor),
            ("tail rotor", &self.config.tail_rotor),
        ] {
            if !(rotor.omega_rad_s > 0.0) {
                return Err(PerformanceError::InvalidConfiguration(format!(
                    "{name} speed must be positive, got {} rad/s",
                    rotor.omega_rad_s
                )));
            }
        }
        Ok(())
    }
}

/// Warnings that depend only on the analysis inputs.
pub(crate) fn input_warnings(k_i: f64, ct_over_sigma: f64) -> Vec<PerformanceWarning> {
    let mut warnings = Vec::new();
    let (lo, hi) = INDUCED_FACTOR_RANGE;
    if !(lo..=hi).contains(&k_i) {
        warnings.push(PerformanceWarning::InducedFactorOutOfRange { k_i });
    }
    if ct_over_sigma > BLADE_LOADING_LIMIT {
        warnings.push(PerformanceWarning::BladeLoading { ct_over_sigma });
    }
    warnings
}
