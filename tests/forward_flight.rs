use approx::assert_relative_eq;
use rotor_performance_calculator::atmosphere::{AtmosphericPoint, standard};
use rotor_performance_calculator::performance::{
    Airspeeds, ForwardFlightOptions, Helicopter, PerformanceError, PerformanceWarning, vehicle,
};

fn project() -> Helicopter {
    vehicle::load("configs/vehicles", Some("Project Helicopter")).expect("project vehicle")
}

#[test]
fn power_curve_is_bucket_shaped() {
    let heli = project();
    let table = heli
        .forward_flight(
            &AtmosphericPoint::sea_level(),
            Airspeeds::sweep(0.0, 160.0, 17),
            &ForwardFlightOptions::default(),
        )
        .unwrap();
    assert_eq!(table.rows.len(), 17);

    let minimum = table.minimum_power().unwrap();
    assert!(minimum.airspeed_kt > 0.0 && minimum.airspeed_kt < 160.0);
    assert_relative_eq!(minimum.airspeed_kt, 60.0, epsilon = 10.0);

    let first = table.first().unwrap();
    let last = table.rows.last().unwrap();
    assert!(first.shp_uninstalled > minimum.shp_uninstalled);
    assert!(last.shp_uninstalled > minimum.shp_uninstalled);
    assert_eq!(first.specific_range_nm_per_lb, 0.0);
}

#[test]
fn reference_cruise_point() {
    let heli = project();
    let table = heli
        .forward_flight(
            &AtmosphericPoint::sea_level(),
            110.0,
            &ForwardFlightOptions::default(),
        )
        .unwrap();
    let row = table.first().unwrap();
    assert_relative_eq!(row.shp_uninstalled, 523.7, max_relative = 0.005);
    assert_relative_eq!(row.specific_range_nm_per_lb, 0.4083, max_relative = 0.005);
    assert_relative_eq!(row.advance_ratio, 0.2456, max_relative = 1e-3);
    // Forward flight adds installation losses on top of installed power.
    let eta_inst = heli.config().engine.installation_efficiency;
    assert_relative_eq!(
        row.shp_uninstalled,
        row.shp_installed * (2.0 - eta_inst),
        max_relative = 1e-9
    );
}

#[test]
fn best_range_sits_above_minimum_power_speed() {
    let heli = project();
    let table = heli
        .forward_flight(
            &AtmosphericPoint::sea_level(),
            Airspeeds::sweep(20.0, 150.0, 14),
            &ForwardFlightOptions::default(),
        )
        .unwrap();
    let best = table.best_range().unwrap();
    let minimum = table.minimum_power().unwrap();
    assert!(best.airspeed_kt > minimum.airspeed_kt);
    assert_relative_eq!(best.airspeed_kt, 110.0, epsilon = 10.0);
}

#[test]
fn altitude_extends_specific_range() {
    let heli = project();
    let options = ForwardFlightOptions::default();
    let sea_level = heli
        .forward_flight(&AtmosphericPoint::sea_level(), 110.0, &options)
        .unwrap();
    let cruise_altitude = heli
        .forward_flight(&standard(5000.0).unwrap(), 110.0, &options)
        .unwrap();
    assert!(
        cruise_altitude.first().unwrap().specific_range_nm_per_lb
            > sea_level.first().unwrap().specific_range_nm_per_lb
    );
}

#[test]
fn high_advance_ratio_is_flagged() {
    let heli = project();
    let table = heli
        .forward_flight(
            &AtmosphericPoint::sea_level(),
            200.0,
            &ForwardFlightOptions::default(),
        )
        .unwrap();
    assert!(
        table.first().unwrap()
            .warnings
            .iter()
            .any(|w| matches!(w, PerformanceWarning::AdvanceRatio { .. }))
    );
}

#[test]
fn tip_speed_airspeed_is_rejected() {
    let heli = project();
    // 756 ft/s tip speed is about 448 kt.
    let result = heli.forward_flight(
        &AtmosphericPoint::sea_level(),
        vec![110.0, 450.0],
        &ForwardFlightOptions::default(),
    );
    assert!(matches!(
        result,
        Err(PerformanceError::InvalidConfiguration(_))
    ));
}

#[test]
fn negative_airspeed_is_rejected() {
    let heli = project();
    let result = heli.forward_flight(
        &AtmosphericPoint::sea_level(),
        vec![60.0, -5.0],
        &ForwardFlightOptions::default(),
    );
    assert!(result.is_err());
}
