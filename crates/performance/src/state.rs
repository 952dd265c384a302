//! Mutable weight state of the vehicle: empty, fuel, and payload weights.

use rotor_config::LoadingConfig;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by weight mutations. A failed mutation leaves the state unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("cannot burn {requested_lb:.2} lb of fuel, only {remaining_lb:.2} lb remain")]
    InsufficientFuel { requested_lb: f64, remaining_lb: f64 },
    #[error("cannot unload {requested_lb:.2} lb of payload, only {remaining_lb:.2} lb remain")]
    InsufficientPayload { requested_lb: f64, remaining_lb: f64 },
    #[error("weight change must be finite and non-negative, got {0}")]
    InvalidAmount(f64),
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
}

/// Current weight breakdown. Gross weight is always derived from the parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleState {
    empty_weight_lb: f64,
    fuel_weight_lb: f64,
    payload_weight_lb: f64,
}

impl VehicleState {
    pub fn new(
        empty_weight_lb: f64,
        fuel_weight_lb: f64,
        payload_weight_lb: f64,
    ) -> Result<Self, StateError> {
        if !(empty_weight_lb.is_finite() && empty_weight_lb > 0.0) {
            return Err(StateError::InvalidWeights(format!(
                "empty weight must be positive, got {empty_weight_lb}"
            )));
        }
        for (name, value) in [("fuel", fuel_weight_lb), ("payload", payload_weight_lb)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StateError::InvalidWeights(format!(
                    "{name} weight must be non-negative, got {value}"
                )));
            }
        }
        Ok(Self {
            empty_weight_lb,
            fuel_weight_lb,
            payload_weight_lb,
        })
    }

    pub fn from_loading(loading: &LoadingConfig) -> Result<Self, StateError> {
        Self::new(
            loading.empty_weight_lb,
            loading.fuel_weight_lb,
            loading.payload_weight_lb,
        )
    }

    pub fn empty_weight_lb(&self) -> f64 {
        self.empty_weight_lb
    }

    pub fn fuel_weight_lb(&self) -> f64 {
        self.fuel_weight_lb
    }

    pub fn payload_weight_lb(&self) -> f64 {
        self.payload_weight_lb
    }

    pub fn gross_weight_lb(&self) -> f64 {
        self.empty_weight_lb + self.fuel_weight_lb + self.payload_weight_lb
    }

    /// Remove fuel. Burning exactly the remaining amount leaves zero.
    pub fn burn(&mut self, fuel_lb: f64) -> Result<(), StateError> {
        check_amount(fuel_lb)?;
        if fuel_lb > self.fuel_weight_lb {
            return Err(StateError::InsufficientFuel {
                requested_lb: fuel_lb,
                remaining_lb: self.fuel_weight_lb,
            });
        }
        self.fuel_weight_lb = (self.fuel_weight_lb - fuel_lb).max(0.0);
        Ok(())
    }

    /// Remove payload.
    pub fn unload(&mut self, payload_lb: f64) -> Result<(), StateError> {
        check_amount(payload_lb)?;
        if payload_lb > self.payload_weight_lb {
            return Err(StateError::InsufficientPayload {
                requested_lb: payload_lb,
                remaining_lb: self.payload_weight_lb,
            });
        }
        self.payload_weight_lb = (self.payload_weight_lb - payload_lb).max(0.0);
        Ok(())
    }

    pub fn load_fuel(&mut self, fuel_lb: f64) -> Result<(), StateError> {
        check_amount(fuel_lb)?;
        self.fuel_weight_lb += fuel_lb;
        Ok(())
    }

    pub fn load_payload(&mut self, payload_lb: f64) -> Result<(), StateError> {
        check_amount(payload_lb)?;
        self.payload_weight_lb += payload_lb;
        Ok(())
    }
}

fn check_amount(amount: f64) -> Result<(), StateError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(StateError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> VehicleState {
        VehicleState::new(2853.0, 869.0, 1278.0).unwrap()
    }

    #[test]
    fn gross_weight_tracks_components() {
        let mut state = project();
        assert_eq!(state.gross_weight_lb(), 5000.0);
        state.burn(69.0).unwrap();
        state.unload(278.0).unwrap();
        assert_eq!(state.gross_weight_lb(), 4653.0);
        state.load_payload(100.0).unwrap();
        state.load_fuel(10.0).unwrap();
        assert_eq!(state.gross_weight_lb(), 4763.0);
    }

    #[test]
    fn burning_all_fuel_leaves_zero() {
        let mut state = project();
        state.burn(869.0).unwrap();
        assert_eq!(state.fuel_weight_lb(), 0.0);
    }

    #[test]
    fn over_burn_fails_without_change() {
        let mut state = project();
        let before = state.clone();
        assert!(matches!(
            state.burn(900.0),
            Err(StateError::InsufficientFuel { .. })
        ));
        assert!(matches!(
            state.unload(1300.0),
            Err(StateError::InsufficientPayload { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut state = project();
        assert!(matches!(state.burn(-1.0), Err(StateError::InvalidAmount(_))));
        assert!(state.unload(f64::NAN).is_err());
        assert!(state.load_fuel(-5.0).is_err());
    }

    #[test]
    fn invalid_initial_weights() {
        assert!(VehicleState::new(0.0, 10.0, 0.0).is_err());
        assert!(VehicleState::new(1000.0, -1.0, 0.0).is_err());
    }
}
