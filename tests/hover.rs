use approx::assert_relative_eq;
use rotor_performance_calculator::atmosphere::{AtmosphericPoint, standard};
use rotor_performance_calculator::config::{ConfigOverride, load_vehicle_config};
use rotor_performance_calculator::performance::{
    GroundEffect, Helicopter, HoverOptions, PerformanceWarning,
};

fn project() -> Helicopter {
    let config = load_vehicle_config("configs/vehicles/project_helicopter.toml", None)
        .expect("project vehicle");
    Helicopter::new(config).expect("valid helicopter")
}

#[test]
fn hoge_uses_full_gross_weight() {
    let heli = project();
    let record = heli
        .hover_out_of_ground_effect(&AtmosphericPoint::sea_level())
        .unwrap();
    assert_eq!(record.gross_weight_lb, 2853.0 + 869.0 + 1278.0);
    assert_relative_eq!(record.thrust_lb, 5000.0 * 1.03, epsilon = 1e-9);
    assert_eq!(record.ground_effect, GroundEffect::OutOfGroundEffect);
}

#[test]
fn reference_hover_power() {
    let heli = project();
    let record = heli
        .hover_out_of_ground_effect(&AtmosphericPoint::sea_level())
        .unwrap();
    assert_relative_eq!(record.thrust_coefficient, 0.003_937, max_relative = 0.01);
    assert_relative_eq!(record.shp_uninstalled, 595.8, max_relative = 0.01);
    assert_relative_eq!(record.sfc_lb_per_hp_hr, 0.498, max_relative = 0.01);
    assert_relative_eq!(
        record.fuel_flow_lb_hr,
        record.sfc_lb_per_hp_hr * record.shp_uninstalled,
        max_relative = 1e-12
    );
    assert!(record.warnings.is_empty(), "{:?}", record.warnings);
}

#[test]
fn ground_effect_reduces_power() {
    let heli = project();
    let sea_level = AtmosphericPoint::sea_level();
    let hoge = heli.hover_out_of_ground_effect(&sea_level).unwrap();
    let hige = heli.hover_in_ground_effect(&sea_level).unwrap();
    assert!(hige.shp_uninstalled <= hoge.shp_uninstalled);
    assert_relative_eq!(hige.shp_uninstalled, 496.0, max_relative = 0.01);
}

#[test]
fn hover_power_increases_with_weight() {
    let mut heli = project();
    let point = standard(2000.0).unwrap();
    let mut previous = heli.hover_out_of_ground_effect(&point).unwrap().shp_uninstalled;
    for _ in 0..5 {
        heli.state_mut().load_payload(250.0).unwrap();
        let shp = heli.hover_out_of_ground_effect(&point).unwrap().shp_uninstalled;
        assert!(shp > previous, "{shp} <= {previous}");
        previous = shp;
    }
}

#[test]
fn dropping_payload_lowers_hover_power() {
    let mut heli = project();
    let sea_level = AtmosphericPoint::sea_level();
    let loaded = heli.hover_out_of_ground_effect(&sea_level).unwrap();
    heli.unload(1278.0).unwrap();
    let empty = heli.hover_out_of_ground_effect(&sea_level).unwrap();
    assert_eq!(empty.gross_weight_lb, 2853.0 + 869.0);
    assert!(empty.shp_uninstalled < loaded.shp_uninstalled);
    assert!(heli.unload(1.0).is_err());
}

#[test]
fn climb_rate_adds_power() {
    let heli = project();
    let sea_level = AtmosphericPoint::sea_level();
    let options = HoverOptions {
        rate_of_climb_fpm: 500.0,
        ..HoverOptions::default()
    };
    let climb = heli.hover(&sea_level, &options).unwrap();
    let hover = heli.hover_out_of_ground_effect(&sea_level).unwrap();
    assert!(climb.cq_climb > 0.0);
    assert!(climb.shp_uninstalled > hover.shp_uninstalled);
}

#[test]
fn heavy_hover_reports_limit_warnings() {
    let mut heli = project();
    heli.state_mut().load_payload(1500.0).unwrap();
    let record = heli
        .hover_out_of_ground_effect(&standard(6000.0).unwrap())
        .unwrap();
    assert!(
        record
            .warnings
            .iter()
            .any(|w| matches!(w, PerformanceWarning::TransmissionLimitExceeded { .. }))
    );
}

#[test]
fn out_of_range_induced_factor_is_flagged() {
    let heli = project();
    let options = HoverOptions {
        k_i: 1.3,
        ..HoverOptions::default()
    };
    let record = heli.hover(&AtmosphericPoint::sea_level(), &options).unwrap();
    assert!(
        record
            .warnings
            .contains(&PerformanceWarning::InducedFactorOutOfRange { k_i: 1.3 })
    );
}

#[test]
fn non_positive_density_is_rejected() {
    let heli = project();
    let vacuum = AtmosphericPoint::from_state(0.0, 0.0, 518.67, 0.0);
    assert!(heli.hover_out_of_ground_effect(&vacuum).is_err());
}

#[test]
fn derived_variant_needs_less_power() {
    let base = project();
    let improved_config = base
        .config()
        .derive(&[
            ConfigOverride::scale("main_rotor.cd0", 0.95),
            ConfigOverride::scale("engine.bsfc", 0.97),
        ])
        .unwrap();
    let improved = Helicopter::new(improved_config).unwrap();
    let sea_level = AtmosphericPoint::sea_level();
    let a = base.hover_out_of_ground_effect(&sea_level).unwrap();
    let b = improved.hover_out_of_ground_effect(&sea_level).unwrap();
    assert!(b.shp_uninstalled < a.shp_uninstalled);
    assert!(b.fuel_flow_lb_hr < a.fuel_flow_lb_hr);
    assert_eq!(base.config().main_rotor.cd0, 0.008);
}
