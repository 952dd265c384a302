//! Hover performance in and out of ground effect, including vertical climb.

use rotor_aero::{DragPolar, hover_torque, tail_rotor_hover};
use rotor_atmosphere::AtmosphericPoint;
use rotor_core::units::fpm_to_ft_s;
use rotor_propulsion::{PerformanceWarning, Regime};
use serde::Serialize;

use crate::helicopter::{Helicopter, PerformanceError, input_warnings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundEffect {
    #[default]
    OutOfGroundEffect,
    InGroundEffect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverOptions {
    pub ground_effect: GroundEffect,
    pub rate_of_climb_fpm: f64,
    /// Induced-power factor applied to both rotors.
    pub k_i: f64,
    pub drag_polar: DragPolar,
    /// Replaces weight plus download as the required thrust (lb).
    pub thrust_override_lb: Option<f64>,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self {
            ground_effect: GroundEffect::OutOfGroundEffect,
            rate_of_climb_fpm: 0.0,
            k_i: 1.1,
            drag_polar: DragPolar::default(),
            thrust_override_lb: None,
        }
    }
}

/// Complete hover solution at one weight and altitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverRecord {
    pub ground_effect: GroundEffect,
    pub gross_weight_lb: f64,
    pub thrust_lb: f64,
    pub lift_curve_slope: f64,
    pub profile_drag_coefficient: f64,
    pub tip_loss_factor: f64,
    pub inflow_ratio: f64,
    pub thrust_coefficient: f64,
    pub tail_rotor_thrust_lb: f64,
    pub cq_induced: f64,
    pub cq_climb: f64,
    pub cq_profile_0: f64,
    pub cq_profile_1: f64,
    pub cq_profile_2: f64,
    pub cq_total: f64,
    pub main_rotor_torque_ft_lb: f64,
    pub main_rotor_power_ft_lb_s: f64,
    pub main_rotor_hp: f64,
    pub tail_rotor_hp: f64,
    pub shp_installed: f64,
    pub shp_uninstalled: f64,
    pub power_pct: f64,
    pub sfc_lb_per_hp_hr: f64,
    pub fuel_flow_lb_hr: f64,
    pub warnings: Vec<PerformanceWarning>,
}

pub(crate) fn solve(
    helicopter: &Helicopter,
    atmosphere: &AtmosphericPoint,
    options: &HoverOptions,
) -> Result<HoverRecord, PerformanceError> {
    helicopter.check_conditions(atmosphere)?;
    if !(options.k_i.is_finite() && options.k_i > 0.0) {
        return Err(PerformanceError::InvalidConfiguration(format!(
            "induced power factor must be positive, got {}",
            options.k_i
        )));
    }

    let config = helicopter.config();
    let gross_weight_lb = helicopter.gross_weight_lb();
    let demanded = options
        .thrust_override_lb
        .unwrap_or(gross_weight_lb * (1.0 + config.airframe.download_fraction));
    let thrust_lb = match options.ground_effect {
        GroundEffect::OutOfGroundEffect => demanded,
        GroundEffect::InGroundEffect => demanded / config.airframe.ground_effect_factor,
    };
    let rho = atmosphere.density_slug_ft3;

    let main = hover_torque(
        &config.main_rotor,
        thrust_lb,
        rho,
        atmosphere.speed_of_sound_ft_s,
        fpm_to_ft_s(options.rate_of_climb_fpm),
        options.drag_polar,
        options.k_i,
    )?;
    let tail_thrust_lb = main.torque_ft_lb / config.airframe.tail_arm_ft;
    let tail = tail_rotor_hover(&config.tail_rotor, tail_thrust_lb, rho, options.k_i)?;

    let engine = helicopter.engine().operating_point(Regime::Hover, main.hp, tail.total_hp);
    let mut warnings = input_warnings(
        options.k_i,
        main.thrust_coefficient / config.main_rotor.solidity(),
    );
    warnings.extend(engine.warnings);
    for warning in &warnings {
        warning.log();
    }
    tracing::debug!(
        gross_weight_lb,
        altitude_ft = atmosphere.altitude_ft,
        shp = engine.shaft.uninstalled_hp,
        "hover solved"
    );

    Ok(HoverRecord {
        ground_effect: options.ground_effect,
        gross_weight_lb,
        thrust_lb,
        lift_curve_slope: main.lift_curve_slope,
        profile_drag_coefficient: main.profile_drag_coefficient,
        tip_loss_factor: main.tip_loss_factor,
        inflow_ratio: main.inflow_ratio,
        thrust_coefficient: main.thrust_coefficient,
        tail_rotor_thrust_lb: tail.thrust_lb,
        cq_induced: main.cq_induced,
        cq_climb: main.cq_climb,
        cq_profile_0: main.cq_profile_0,
        cq_profile_1: main.cq_profile_1,
        cq_profile_2: main.cq_profile_2,
        cq_total: main.cq_total,
        main_rotor_torque_ft_lb: main.torque_ft_lb,
        main_rotor_power_ft_lb_s: main.power_ft_lb_s,
        main_rotor_hp: main.hp,
        tail_rotor_hp: tail.total_hp,
        shp_installed: engine.shaft.installed_hp,
        shp_uninstalled: engine.shaft.uninstalled_hp,
        power_pct: engine.shaft.power_pct,
        sfc_lb_per_hp_hr: engine.sfc_lb_per_hp_hr,
        fuel_flow_lb_hr: engine.fuel_flow_lb_hr,
        warnings,
    })
}
