//! Level forward-flight performance with Glauert inflow.

use rotor_aero::{
    FlightCondition, compressible_profile_drag, forward_profile_power_hp, glauert_inflow,
    hover_induced_velocity, profile_drag, thrust_coefficient, tip_loss_factor,
};
use rotor_atmosphere::AtmosphericPoint;
use rotor_core::constants::FT_LB_S_PER_HP;
use rotor_core::units::knots_to_ft_s;
use rotor_propulsion::{PerformanceWarning, Regime};
use serde::Serialize;

use crate::helicopter::{Helicopter, PerformanceError, input_warnings};

/// Advance ratio above which the model is outside its validated range.
pub const ADVANCE_RATIO_LIMIT: f64 = 0.4;

/// One or more true airspeeds (kt) to analyse, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Airspeeds(Vec<f64>);

impl Airspeeds {
    /// `count` evenly spaced speeds from `start_kt` to `end_kt` inclusive.
    pub fn sweep(start_kt: f64, end_kt: f64, count: usize) -> Self {
        match count {
            0 => Self(Vec::new()),
            1 => Self(vec![start_kt]),
            _ => {
                let step = (end_kt - start_kt) / (count - 1) as f64;
                Self((0..count).map(|i| start_kt + step * i as f64).collect())
            }
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<f64> for Airspeeds {
    fn from(value: f64) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<f64>> for Airspeeds {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Airspeeds {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardFlightOptions {
    /// Induced-power factor applied to both rotors.
    pub k_i: f64,
}

impl Default for ForwardFlightOptions {
    fn default() -> Self {
        Self { k_i: 1.0 }
    }
}

/// Performance at one airspeed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardFlightRow {
    pub airspeed_kt: f64,
    pub dynamic_pressure_psf: f64,
    pub advance_ratio: f64,
    pub induced_velocity_ft_s: f64,
    pub ct_over_sigma: f64,
    pub stall_drag_increment: f64,
    pub drag_divergence_mach: f64,
    pub advancing_tip_mach: f64,
    pub compressibility_drag_increment: f64,
    pub profile_drag_coefficient: f64,
    pub induced_hp: f64,
    pub profile_hp: f64,
    pub parasite_hp: f64,
    pub main_rotor_hp: f64,
    pub main_rotor_torque_ft_lb: f64,
    pub antitorque_thrust_lb: f64,
    pub fin_lift_lb: f64,
    pub fin_induced_drag_lb: f64,
    pub tail_rotor_thrust_lb: f64,
    pub tail_rotor_induced_velocity_ft_s: f64,
    pub tail_rotor_hp: f64,
    pub shp_installed: f64,
    pub shp_uninstalled: f64,
    pub lift_to_drag: f64,
    pub power_pct: f64,
    pub sfc_lb_per_hp_hr: f64,
    pub fuel_flow_lb_hr: f64,
    pub specific_range_nm_per_lb: f64,
    pub rate_of_climb_fpm: f64,
    pub warnings: Vec<PerformanceWarning>,
}

/// Rows in input airspeed order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ForwardFlightTable {
    pub rows: Vec<ForwardFlightRow>,
}

impl ForwardFlightTable {
    /// Minimum uninstalled power row (best endurance).
    pub fn minimum_power(&self) -> Option<&ForwardFlightRow> {
        self.rows
            .iter()
            .min_by(|a, b| a.shp_uninstalled.total_cmp(&b.shp_uninstalled))
    }

    /// Maximum specific range row.
    pub fn best_range(&self) -> Option<&ForwardFlightRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.specific_range_nm_per_lb.total_cmp(&b.specific_range_nm_per_lb))
    }

    pub fn max_rate_of_climb(&self) -> Option<&ForwardFlightRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.rate_of_climb_fpm.total_cmp(&b.rate_of_climb_fpm))
    }

    pub fn first(&self) -> Option<&ForwardFlightRow> {
        self.rows.first()
    }
}

pub(crate) fn solve(
    helicopter: &Helicopter,
    atmosphere: &AtmosphericPoint,
    airspeeds: &Airspeeds,
    options: &ForwardFlightOptions,
) -> Result<ForwardFlightTable, PerformanceError> {
    helicopter.check_conditions(atmosphere)?;
    if !(options.k_i.is_finite() && options.k_i > 0.0) {
        return Err(PerformanceError::InvalidConfiguration(format!(
            "induced power factor must be positive, got {}",
            options.k_i
        )));
    }
    if let Some(bad) = airspeeds
        .as_slice()
        .iter()
        .find(|v| !(v.is_finite() && **v >= 0.0))
    {
        return Err(PerformanceError::InvalidConfiguration(format!(
            "airspeed must be finite and non-negative, got {bad} kt"
        )));
    }

    let rows = airspeeds
        .as_slice()
        .iter()
        .map(|&airspeed_kt| solve_row(helicopter, atmosphere, airspeed_kt, options.k_i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ForwardFlightTable { rows })
}

fn solve_row(
    helicopter: &Helicopter,
    atmosphere: &AtmosphericPoint,
    airspeed_kt: f64,
    k_i: f64,
) -> Result<ForwardFlightRow, PerformanceError> {
    let config = helicopter.config();
    let main = &config.main_rotor;
    let tail = &config.tail_rotor;
    let airframe = &config.airframe;
    let rho = atmosphere.density_slug_ft3;
    let gross_weight_lb = helicopter.gross_weight_lb();

    let airspeed = knots_to_ft_s(airspeed_kt);
    let q = 0.5 * rho * airspeed.powi(2);
    let tip_speed = main.tip_speed_ft_s();
    let mu = airspeed / tip_speed;
    if mu >= 1.0 {
        return Err(PerformanceError::InvalidConfiguration(format!(
            "advance ratio {mu:.3} at {airspeed_kt} kt reaches the rotor tip speed"
        )));
    }

    // Main rotor
    let thrust = gross_weight_lb * (1.0 + airframe.download_fraction);
    let ct = thrust_coefficient(thrust, rho, main.disk_area_ft2(), tip_speed);
    let tip_loss = tip_loss_factor(ct, main.blade_count)?;
    let v0 = hover_induced_velocity(thrust, rho, main.radius_ft(), tip_loss);
    let induced_velocity = glauert_inflow(v0, airspeed)?;
    let ct_over_sigma = ct / main.solidity();

    // Base profile drag is frozen at its sea-level value; altitude enters through the rises.
    let base_cd = compressible_profile_drag(
        main.cd0,
        tip_speed,
        AtmosphericPoint::sea_level().speed_of_sound_ft_s,
    );
    let drag = profile_drag(
        base_cd,
        &FlightCondition {
            ct_over_sigma,
            advance_ratio: mu,
            airspeed_ft_s: airspeed,
            tip_speed_ft_s: tip_speed,
            speed_of_sound_ft_s: atmosphere.speed_of_sound_ft_s,
            dynamic_pressure_psf: q,
            flat_plate_area_ft2: airframe.flat_plate_area_ft2,
            gross_weight_lb,
        },
    );

    let induced_hp = k_i * thrust * induced_velocity / FT_LB_S_PER_HP;
    let profile_hp = forward_profile_power_hp(main, drag.cd, mu, rho);
    let parasite_hp = airframe.flat_plate_area_ft2 * rho * airspeed.powi(3) / 1100.0;
    let main_rotor_hp = induced_hp + profile_hp + parasite_hp;
    let main_rotor_torque_ft_lb = FT_LB_S_PER_HP * main_rotor_hp / main.omega_rad_s;

    // Tail rotor, offloaded by the vertical fin
    let antitorque_thrust_lb = main_rotor_torque_ft_lb / airframe.tail_arm_ft;
    let fin_lift_lb = airframe.fin_lift_coefficient * airframe.fin_area_ft2 * q;
    let fin_induced_drag_lb = if q > 0.0 {
        fin_lift_lb.powi(2) / (2.0 * q * airframe.fin_area_ft2 * airframe.fin_aspect_ratio)
    } else {
        0.0
    };
    let tail_rotor_thrust_lb = antitorque_thrust_lb - fin_lift_lb;
    let tail_v0 = (tail_rotor_thrust_lb.abs() / (2.0 * rho * tail.disk_area_ft2())).sqrt();
    let tail_induced_velocity = glauert_inflow(tail_v0, airspeed)?;
    let tail_rotor_hp = k_i * tail_rotor_thrust_lb.abs() * tail_induced_velocity / FT_LB_S_PER_HP
        + forward_profile_power_hp(tail, tail.cd0, mu, rho);

    // Engine
    let engine = helicopter
        .engine()
        .operating_point(Regime::Forward, main_rotor_hp, tail_rotor_hp);
    let uninstalled = engine.shaft.uninstalled_hp;
    let rated = helicopter.engine().config().rated_power_hp;
    let specific_range_nm_per_lb = if engine.fuel_flow_lb_hr > 0.0 && airspeed_kt > 0.0 {
        airspeed_kt / engine.fuel_flow_lb_hr
    } else {
        0.0
    };
    let rate_of_climb_fpm = 33_000.0 * (rated - uninstalled) / gross_weight_lb;
    let lift_to_drag = if uninstalled > 0.0 {
        gross_weight_lb * airspeed / (FT_LB_S_PER_HP * uninstalled)
    } else {
        0.0
    };

    let mut warnings = input_warnings(k_i, ct_over_sigma);
    if mu > ADVANCE_RATIO_LIMIT {
        warnings.push(PerformanceWarning::AdvanceRatio { mu });
    }
    warnings.extend(engine.warnings);
    for warning in &warnings {
        warning.log();
    }

    Ok(ForwardFlightRow {
        airspeed_kt,
        dynamic_pressure_psf: q,
        advance_ratio: mu,
        induced_velocity_ft_s: induced_velocity,
        ct_over_sigma,
        stall_drag_increment: drag.stall_increment,
        drag_divergence_mach: drag.drag_divergence_mach,
        advancing_tip_mach: drag.advancing_tip_mach,
        compressibility_drag_increment: drag.compressibility_increment,
        profile_drag_coefficient: drag.cd,
        induced_hp,
        profile_hp,
        parasite_hp,
        main_rotor_hp,
        main_rotor_torque_ft_lb,
        antitorque_thrust_lb,
        fin_lift_lb,
        fin_induced_drag_lb,
        tail_rotor_thrust_lb,
        tail_rotor_induced_velocity_ft_s: tail_induced_velocity,
        tail_rotor_hp,
        shp_installed: engine.shaft.installed_hp,
        shp_uninstalled: uninstalled,
        lift_to_drag,
        power_pct: engine.shaft.power_pct,
        sfc_lb_per_hp_hr: engine.sfc_lb_per_hp_hr,
        fuel_flow_lb_hr: engine.fuel_flow_lb_hr,
        specific_range_nm_per_lb,
        rate_of_climb_fpm,
        warnings,
    })
}
