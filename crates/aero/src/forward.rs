//! Forward-flight profile drag build-up: retreating-blade stall and advancing-tip
//! compressibility increments on top of the section drag coefficient.

use rotor_config::RotorConfig;
use serde::Serialize;

use crate::hover::profile_power_hp;

/// Empirical stall onset offset in the loading parameter.
const STALL_ONSET: f64 = 0.1376;
const STALL_GAIN: f64 = 18.3;

/// Profile drag coefficient breakdown at one flight condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileDrag {
    pub stall_increment: f64,
    pub drag_divergence_mach: f64,
    pub advancing_tip_mach: f64,
    pub compressibility_increment: f64,
    pub cd: f64,
}

/// Inputs to [`profile_drag`] describing the flight condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightCondition {
    pub ct_over_sigma: f64,
    pub advance_ratio: f64,
    pub airspeed_ft_s: f64,
    pub tip_speed_ft_s: f64,
    pub speed_of_sound_ft_s: f64,
    pub dynamic_pressure_psf: f64,
    pub flat_plate_area_ft2: f64,
    pub gross_weight_lb: f64,
}

/// Total section drag `cd = δ₀ + Δcd_stall + Δcd_comp`.
pub fn profile_drag(base_cd: f64, condition: &FlightCondition) -> ProfileDrag {
    let one_minus_mu_sq = (1.0 - condition.advance_ratio).powi(2);
    let loading = condition.ct_over_sigma / one_minus_mu_sq
        * (1.0
            + condition.flat_plate_area_ft2 * condition.dynamic_pressure_psf
                / condition.gross_weight_lb)
        - STALL_ONSET;
    let stall_increment = (STALL_GAIN * one_minus_mu_sq * loading.powi(3)).max(0.0);

    let drag_divergence_mach = 0.82 - 2.4 * condition.ct_over_sigma;
    let advancing_tip_mach =
        (condition.airspeed_ft_s + condition.tip_speed_ft_s) / condition.speed_of_sound_ft_s;
    let excess = advancing_tip_mach - drag_divergence_mach;
    let compressibility_increment = 0.2 * excess.powi(3) + 0.0085 * excess;

    ProfileDrag {
        stall_increment,
        drag_divergence_mach,
        advancing_tip_mach,
        compressibility_increment,
        cd: base_cd + stall_increment + compressibility_increment,
    }
}

/// Blade profile power in edgewise flight (hp).
pub fn forward_profile_power_hp(
    rotor: &RotorConfig,
    cd: f64,
    advance_ratio: f64,
    density: f64,
) -> f64 {
    profile_power_hp(rotor, cd, advance_ratio, density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn condition(knots: f64) -> FlightCondition {
        let airspeed = knots * 1.687_81;
        let q = 0.5 * 0.002_376_892 * airspeed.powi(2);
        FlightCondition {
            ct_over_sigma: 0.0522,
            advance_ratio: airspeed / 756.0,
            airspeed_ft_s: airspeed,
            tip_speed_ft_s: 756.0,
            speed_of_sound_ft_s: 1116.4,
            dynamic_pressure_psf: q,
            flat_plate_area_ft2: 12.9,
            gross_weight_lb: 5000.0,
        }
    }

    #[test]
    fn lightly_loaded_rotor_has_no_stall_increment() {
        let drag = profile_drag(0.0095, &condition(60.0));
        assert_eq!(drag.stall_increment, 0.0);
        assert_relative_eq!(drag.drag_divergence_mach, 0.82 - 2.4 * 0.0522);
    }

    #[test]
    fn compressibility_grows_with_airspeed() {
        let slow = profile_drag(0.0095, &condition(60.0));
        let fast = profile_drag(0.0095, &condition(160.0));
        assert!(fast.advancing_tip_mach > slow.advancing_tip_mach);
        assert!(fast.compressibility_increment > slow.compressibility_increment);
        assert_relative_eq!(
            fast.cd,
            0.0095 + fast.stall_increment + fast.compressibility_increment
        );
    }

    #[test]
    fn high_loading_triggers_stall() {
        let mut heavy = condition(150.0);
        heavy.ct_over_sigma = 0.14;
        assert!(profile_drag(0.0095, &heavy).stall_increment > 0.0);
    }
}
