//! Turboshaft power plant: drivetrain losses, BSFC curve, fuel flow, and limit checks.

use rotor_config::EngineConfig;
use serde::Serialize;

pub mod warnings;

pub use warnings::PerformanceWarning;

/// Power fraction band over which the BSFC polynomial was fitted (%).
pub const BSFC_VALID_RANGE_PCT: (f64, f64) = (10.0, 110.0);

/// Fixed engine rating used by the mission stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Intermediate rated power.
    Irp,
    /// Maximum continuous power.
    Mcp,
}

/// Drivetrain loss accounting. Hover and forward flight book the tail rotor, accessory,
/// and installation losses differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    #[default]
    Hover,
    Forward,
}

/// Power breakdown from aerodynamic shaft power to engine-spec power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShaftPower {
    pub main_rotor_hp: f64,
    pub tail_rotor_hp: f64,
    pub installed_hp: f64,
    pub uninstalled_hp: f64,
    pub power_pct: f64,
}

/// Fuel-burn state of the engine at one shaft-power demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingPoint {
    pub shaft: ShaftPower,
    pub sfc_lb_per_hp_hr: f64,
    pub fuel_flow_lb_hr: f64,
    pub warnings: Vec<PerformanceWarning>,
}

/// Engine and drivetrain model built from an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct PowerPlant {
    config: EngineConfig,
}

impl PowerPlant {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Brake-specific fuel consumption (lb/hp/hr) at a percent of rated power.
    ///
    /// No bounds are enforced; see [`PowerPlant::bsfc_checked`].
    pub fn bsfc(&self, power_pct: f64) -> f64 {
        self.config
            .bsfc
            .iter()
            .rev()
            .fold(0.0, |acc, coeff| acc * power_pct + coeff)
    }

    /// BSFC plus an extrapolation warning outside the fitted band.
    pub fn bsfc_checked(&self, power_pct: f64) -> (f64, Option<PerformanceWarning>) {
        let (lo, hi) = BSFC_VALID_RANGE_PCT;
        let warning = if (lo..=hi).contains(&power_pct) {
            None
        } else {
            Some(PerformanceWarning::BsfcExtrapolation { power_pct })
        };
        (self.bsfc(power_pct), warning)
    }

    /// Shaft power demanded at the engine, including transmission, combining gearbox,
    /// and accessory drive losses (hp).
    pub fn installed_power(&self, regime: Regime, main_rotor_hp: f64, tail_rotor_hp: f64) -> f64 {
        let c = &self.config;
        let eta_co = c.combining_gearbox_efficiency;
        let main_loss = main_rotor_hp * (1.0 - c.main_rotor_transmission_efficiency * eta_co);
        let (tail_loss, accessory_loss) = match regime {
            Regime::Hover => (
                tail_rotor_hp * (1.0 - c.tail_rotor_transmission_efficiency * eta_co),
                c.accessory_power_hp * eta_co,
            ),
            // Tail drive bypasses the combining gearbox in forward flight.
            Regime::Forward => (
                tail_rotor_hp * (1.0 - c.tail_rotor_transmission_efficiency),
                c.accessory_power_hp * (1.0 - eta_co),
            ),
        };
        main_rotor_hp
            + tail_rotor_hp
            + c.accessory_power_hp
            + main_loss
            + tail_loss
            + accessory_loss
    }

    /// Engine-spec power with installation losses removed (hp).
    pub fn uninstalled_power(&self, regime: Regime, installed_hp: f64) -> f64 {
        let eta = self.config.installation_efficiency;
        match regime {
            Regime::Hover => installed_hp / eta,
            Regime::Forward => installed_hp * (2.0 - eta),
        }
    }

    pub fn power_pct(&self, uninstalled_hp: f64) -> f64 {
        100.0 * uninstalled_hp / self.config.rated_power_hp
    }

    pub fn shaft_power(
        &self,
        regime: Regime,
        main_rotor_hp: f64,
        tail_rotor_hp: f64,
    ) -> ShaftPower {
        let installed_hp = self.installed_power(regime, main_rotor_hp, tail_rotor_hp);
        let uninstalled_hp = self.uninstalled_power(regime, installed_hp);
        ShaftPower {
            main_rotor_hp,
            tail_rotor_hp,
            installed_hp,
            uninstalled_hp,
            power_pct: self.power_pct(uninstalled_hp),
        }
    }

    /// Fuel flow (lb/hr) at an uninstalled power.
    pub fn fuel_flow(&self, uninstalled_hp: f64) -> f64 {
        self.bsfc(self.power_pct(uninstalled_hp)) * uninstalled_hp
    }

    /// Engine rated and transmission limit exceedances. Reported only; nothing is clamped.
    pub fn check_limits(&self, uninstalled_hp: f64) -> Vec<PerformanceWarning> {
        let mut warnings = Vec::new();
        if uninstalled_hp > self.config.rated_power_hp {
            warnings.push(PerformanceWarning::EngineLimitExceeded {
                required_hp: uninstalled_hp,
                limit_hp: self.config.rated_power_hp,
            });
        }
        if uninstalled_hp > self.config.transmission_limit_hp {
            warnings.push(PerformanceWarning::TransmissionLimitExceeded {
                required_hp: uninstalled_hp,
                limit_hp: self.config.transmission_limit_hp,
            });
        }
        warnings
    }

    /// Full engine solution for a rotor power demand, with limit and BSFC warnings.
    pub fn operating_point(
        &self,
        regime: Regime,
        main_rotor_hp: f64,
        tail_rotor_hp: f64,
    ) -> OperatingPoint {
        let shaft = self.shaft_power(regime, main_rotor_hp, tail_rotor_hp);
        let (sfc, extrapolated) = self.bsfc_checked(shaft.power_pct);
        let mut warnings = self.check_limits(shaft.uninstalled_hp);
        warnings.extend(extrapolated);
        OperatingPoint {
            shaft,
            sfc_lb_per_hp_hr: sfc,
            fuel_flow_lb_hr: sfc * shaft.uninstalled_hp,
            warnings,
        }
    }

    /// Ground-idle fuel flow (lb/hr).
    pub fn idle_fuel_flow(&self) -> f64 {
        self.flow_at_pct(self.config.idle_power_pct)
    }

    /// Fuel flow (lb/hr) at a fixed engine rating.
    pub fn rating_fuel_flow(&self, rating: Rating) -> f64 {
        let pct = match rating {
            Rating::Irp => self.config.irp_power_pct,
            Rating::Mcp => self.config.mcp_power_pct,
        };
        self.flow_at_pct(pct)
    }

    fn flow_at_pct(&self, pct: f64) -> f64 {
        self.bsfc(pct) * pct * self.config.rated_power_hp / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> PowerPlant {
        PowerPlant::new(EngineConfig::default())
    }

    #[test]
    fn bsfc_at_rated_power() {
        assert_relative_eq!(engine().bsfc(100.0), 0.474, epsilon = 1e-9);
    }

    #[test]
    fn bsfc_warns_outside_fitted_band() {
        let plant = engine();
        assert!(plant.bsfc_checked(50.0).1.is_none());
        assert!(plant.bsfc_checked(110.0).1.is_none());
        assert!(matches!(
            plant.bsfc_checked(5.0).1,
            Some(PerformanceWarning::BsfcExtrapolation { .. })
        ));
        assert!(plant.bsfc_checked(120.0).1.is_some());
    }

    #[test]
    fn installed_power_includes_drivetrain_losses() {
        let plant = engine();
        let shaft = plant.shaft_power(Regime::Hover, 500.0, 30.0);
        assert_relative_eq!(shaft.installed_hp, 565.526904, epsilon = 1e-6);
        assert_relative_eq!(shaft.uninstalled_hp, 595.291478, epsilon = 1e-5);
        assert_relative_eq!(shaft.power_pct, 100.0 * 595.291478 / 813.0, epsilon = 1e-5);
    }

    #[test]
    fn forward_drivetrain_books_losses_differently() {
        let plant = engine();
        let shaft = plant.shaft_power(Regime::Forward, 500.0, 30.0);
        // 500 + 30 + 10 + 500(1 - .985*.986) + 30(1 - .9712) + 10(1 - .986)
        assert_relative_eq!(shaft.installed_hp, 555.399, epsilon = 1e-6);
        assert_relative_eq!(shaft.uninstalled_hp, 555.399 * 1.05, epsilon = 1e-6);
        let hover = plant.shaft_power(Regime::Hover, 500.0, 30.0);
        assert!(shaft.uninstalled_hp < hover.uninstalled_hp);
        let point = plant.operating_point(Regime::Forward, 500.0, 30.0);
        assert_relative_eq!(
            point.fuel_flow_lb_hr,
            plant.fuel_flow(shaft.uninstalled_hp),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rating_and_idle_fuel_flows() {
        let plant = engine();
        assert_relative_eq!(plant.idle_fuel_flow(), 136.110197, epsilon = 1e-5);
        assert_relative_eq!(plant.rating_fuel_flow(Rating::Irp), 0.474 * 813.0, epsilon = 1e-6);
        assert_relative_eq!(plant.rating_fuel_flow(Rating::Mcp), 372.010012, epsilon = 1e-5);
    }

    #[test]
    fn limits_are_reported_not_clamped() {
        let plant = engine();
        assert!(plant.check_limits(600.0).is_empty());
        assert_eq!(plant.check_limits(700.0).len(), 1);
        let both = plant.check_limits(900.0);
        assert_eq!(both.len(), 2);
        assert_relative_eq!(plant.fuel_flow(900.0), plant.bsfc(100.0 * 900.0 / 813.0) * 900.0);
    }
}
