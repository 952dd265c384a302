//! Hover and vertical-climb torque from combined momentum/blade-element theory.

use std::f64::consts::PI;

use rotor_config::RotorConfig;
use rotor_core::constants::FT_LB_S_PER_HP;
use serde::Serialize;

use crate::{
    AeroError, compressible_profile_drag, hover_induced_velocity, lift_curve_slope,
    thrust_coefficient, tip_loss_factor,
};

/// Second and third terms of the three-term section drag polar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragPolar {
    pub delta_1: f64,
    pub delta_2: f64,
}

impl Default for DragPolar {
    fn default() -> Self {
        Self {
            delta_1: -0.0216,
            delta_2: 0.4,
        }
    }
}

/// Main-rotor torque build-up in hover or axial climb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverTorque {
    pub thrust_coefficient: f64,
    pub tip_loss_factor: f64,
    pub lift_curve_slope: f64,
    pub profile_drag_coefficient: f64,
    /// Induced plus climb inflow over tip speed.
    pub inflow_ratio: f64,
    pub cq_induced: f64,
    pub cq_climb: f64,
    pub cq_profile_0: f64,
    pub cq_profile_1: f64,
    pub cq_profile_2: f64,
    pub cq_total: f64,
    pub power_ft_lb_s: f64,
    /// Shaft horsepower with the induced-power factor applied.
    pub hp: f64,
    pub torque_ft_lb: f64,
}

/// Solve main-rotor torque for a thrust and climb rate.
///
/// Power is referenced to the tip-loss-reduced disk `π(BR)²`; `k_i` scales the rotor
/// power as a whole.
pub fn hover_torque(
    rotor: &RotorConfig,
    thrust_lb: f64,
    density: f64,
    speed_of_sound: f64,
    climb_rate_ft_s: f64,
    polar: DragPolar,
    k_i: f64,
) -> Result<HoverTorque, AeroError> {
    if !(density > 0.0) {
        return Err(AeroError::InvalidInput("density must be positive"));
    }
    if !thrust_lb.is_finite() || thrust_lb < 0.0 {
        return Err(AeroError::InvalidInput("thrust must be finite and non-negative"));
    }
    if !climb_rate_ft_s.is_finite() {
        return Err(AeroError::InvalidInput("climb rate must be finite"));
    }

    let vtip = rotor.tip_speed_ft_s();
    let radius = rotor.radius_ft();
    let sigma = rotor.solidity();

    let ct = thrust_coefficient(thrust_lb, density, rotor.disk_area_ft2(), vtip);
    let b = tip_loss_factor(ct, rotor.blade_count)?;
    let a = lift_curve_slope(rotor.aspect_ratio());
    let delta_0 = compressible_profile_drag(rotor.cd0, vtip, speed_of_sound);

    let climb_ratio = climb_rate_ft_s / vtip;
    let loading = ct / b.powi(2);
    let cq_induced = 0.5 * ct * (climb_ratio.powi(2) + 2.0 * loading).sqrt();
    let cq_climb = climb_ratio * ct / 2.0;
    let cq_profile_0 = sigma * delta_0 / 8.0;
    let cq_profile_1 = (2.0 * polar.delta_1 / (3.0 * a)) * loading;
    let cq_profile_2 = (4.0 * polar.delta_2 / (sigma * a.powi(2))) * loading.powi(2);
    let cq_total = cq_induced + cq_climb + cq_profile_0 + cq_profile_1 + cq_profile_2;

    let effective_area = PI * (b * radius).powi(2);
    let power_ft_lb_s = cq_total * density * effective_area * vtip.powi(3);
    let hp = power_ft_lb_s * k_i / FT_LB_S_PER_HP;
    let torque_ft_lb = hp * FT_LB_S_PER_HP * radius / vtip;

    let inflow_ratio = if ct > 0.0 {
        (cq_induced + cq_climb) / ct
    } else {
        climb_ratio.max(0.0)
    };

    Ok(HoverTorque {
        thrust_coefficient: ct,
        tip_loss_factor: b,
        lift_curve_slope: a,
        profile_drag_coefficient: delta_0,
        inflow_ratio,
        cq_induced,
        cq_climb,
        cq_profile_0,
        cq_profile_1,
        cq_profile_2,
        cq_total,
        power_ft_lb_s,
        hp,
        torque_ft_lb,
    })
}

/// Tail-rotor thrust and power in hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailRotorPower {
    pub thrust_lb: f64,
    pub induced_velocity_ft_s: f64,
    pub induced_hp: f64,
    pub profile_hp: f64,
    pub total_hp: f64,
}

/// Tail-rotor power to react `thrust_lb` of anti-torque in hover.
pub fn tail_rotor_hover(
    rotor: &RotorConfig,
    thrust_lb: f64,
    density: f64,
    k_i: f64,
) -> Result<TailRotorPower, AeroError> {
    if !thrust_lb.is_finite() || thrust_lb < 0.0 {
        return Err(AeroError::InvalidInput("tail-rotor thrust must be finite and non-negative"));
    }
    let vtip = rotor.tip_speed_ft_s();
    let area = rotor.disk_area_ft2();
    let ct = thrust_coefficient(thrust_lb, density, area, vtip);
    let b = tip_loss_factor(ct, rotor.blade_count)?;
    let vi = hover_induced_velocity(thrust_lb, density, rotor.radius_ft(), b);

    let induced_hp = k_i * thrust_lb * vi / FT_LB_S_PER_HP;
    let profile_hp = profile_power_hp(rotor, rotor.cd0, 0.0, density);
    Ok(TailRotorPower {
        thrust_lb,
        induced_velocity_ft_s: vi,
        induced_hp,
        profile_hp,
        total_hp: induced_hp + profile_hp,
    })
}

/// Blade profile power `σ·cd·(1 + 4.65μ²)·ρ·A·Vtip³ / 4400` (hp).
pub(crate) fn profile_power_hp(rotor: &RotorConfig, cd: f64, mu: f64, density: f64) -> f64 {
    rotor.solidity()
        * cd
        * (1.0 + 4.65 * mu.powi(2))
        * density
        * rotor.disk_area_ft2()
        * rotor.tip_speed_ft_s().powi(3)
        / 4400.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RHO: f64 = 0.002_376_892;
    const SOUND: f64 = 1116.424;

    fn main_rotor() -> RotorConfig {
        RotorConfig {
            diameter_ft: 35.0,
            blade_count: 4,
            chord_in: 10.4,
            omega_rad_s: 43.2,
            cd0: 0.008,
        }
    }

    fn tail_rotor() -> RotorConfig {
        RotorConfig {
            diameter_ft: 5.42,
            blade_count: 4,
            chord_in: 7.0,
            omega_rad_s: 239.85,
            cd0: 0.015,
        }
    }

    #[test]
    fn reference_hover_torque_breakdown() {
        let torque =
            hover_torque(&main_rotor(), 5150.0, RHO, SOUND, 0.0, DragPolar::default(), 1.1)
                .unwrap();
        assert_relative_eq!(torque.cq_induced, 1.788_645e-4, max_relative = 1e-5);
        assert_relative_eq!(torque.cq_profile_0, 7.501_68e-5, max_relative = 1e-4);
        assert_relative_eq!(torque.cq_profile_1, -1.038_06e-5, max_relative = 1e-4);
        assert_relative_eq!(torque.cq_profile_2, 1.318_60e-5, max_relative = 1e-4);
        assert_eq!(torque.cq_climb, 0.0);
        assert_relative_eq!(torque.hp, 484.999, max_relative = 1e-4);
        assert_relative_eq!(torque.torque_ft_lb, 6174.75, max_relative = 1e-4);
        assert_relative_eq!(torque.inflow_ratio, 0.045_394, max_relative = 1e-4);
    }

    #[test]
    fn climb_adds_torque() {
        let rotor = main_rotor();
        let polar = DragPolar::default();
        let hover = hover_torque(&rotor, 5150.0, RHO, SOUND, 0.0, polar, 1.1).unwrap();
        let climb = hover_torque(&rotor, 5150.0, RHO, SOUND, 500.0 / 60.0, polar, 1.1).unwrap();
        assert!(climb.cq_climb > 0.0);
        assert!(climb.hp > hover.hp);
    }

    #[test]
    fn tail_rotor_reacts_main_rotor_torque() {
        let power = tail_rotor_hover(&tail_rotor(), 6174.75 / 21.21, RHO, 1.1).unwrap();
        assert_relative_eq!(power.induced_velocity_ft_s, 53.646, max_relative = 1e-4);
        assert_relative_eq!(power.induced_hp, 31.2353, max_relative = 1e-4);
        assert_relative_eq!(power.profile_hp, 14.0709, max_relative = 1e-4);
    }

    #[test]
    fn rejects_non_physical_inputs() {
        let rotor = main_rotor();
        let polar = DragPolar::default();
        assert!(hover_torque(&rotor, 5150.0, 0.0, SOUND, 0.0, polar, 1.1).is_err());
        assert!(hover_torque(&rotor, f64::NAN, RHO, SOUND, 0.0, polar, 1.1).is_err());
        assert!(tail_rotor_hover(&tail_rotor(), -1.0, RHO, 1.1).is_err());
    }
}
