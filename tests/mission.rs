use approx::assert_relative_eq;
use rotor_performance_calculator::atmosphere::StandardAtmosphere;
use rotor_performance_calculator::config::{ManeuverKind, load_mission, load_vehicle_config};
use rotor_performance_calculator::performance::{
    Helicopter, Maneuver, MissionError, MissionOptions, PerformanceError, StateError, fly_mission,
};
use rotor_performance_calculator::scenario::Scenario;

const VEHICLES: &str = "configs/vehicles";
const MISSION: &str = "configs/missions/project_spec.yaml";

fn project() -> Helicopter {
    let config = load_vehicle_config("configs/vehicles/project_helicopter.toml", None)
        .expect("project vehicle");
    Helicopter::new(config).expect("valid helicopter")
}

#[test]
fn reference_mission_file_loads() {
    let records = load_mission(MISSION).expect("mission file");
    assert_eq!(records.len(), 12);
    assert_eq!(records[3].kind, ManeuverKind::Cruise);
    assert_eq!(records[3].value, Some(110.0));
    assert_eq!(records[6].kind, ManeuverKind::Unload);
}

#[test]
fn reference_mission_lands_with_reserve() {
    let mut scenario =
        Scenario::load(VEHICLES, Some("project helicopter"), MISSION).expect("scenario");
    let report = scenario.fly(&MissionOptions::default()).expect("mission flies");

    assert_eq!(report.segments.len(), 12);
    assert_relative_eq!(report.range_nm, 340.0, epsilon = 1e-9);
    assert_relative_eq!(report.fuel_remaining_lb, 32.8, epsilon = 1.0);
    assert_relative_eq!(
        report.fuel_burned_lb + report.fuel_remaining_lb,
        869.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        report.final_gross_weight_lb,
        2853.0 + report.fuel_remaining_lb,
        epsilon = 1e-9
    );

    let cruise = &report.segments[3];
    assert_eq!(cruise.kind, ManeuverKind::Cruise);
    assert_relative_eq!(cruise.fuel_burned_lb, 374.0, epsilon = 2.0);
    assert_relative_eq!(report.segments[0].fuel_burned_lb, 2.269, epsilon = 0.01);
    assert_relative_eq!(report.segments[1].fuel_burned_lb, 6.423, epsilon = 0.01);
    assert_relative_eq!(report.segments[2].fuel_burned_lb, 31.001, epsilon = 0.01);
    assert!(report.segments[6].gross_weight_lb < report.segments[5].gross_weight_lb - 1278.0);
}

#[test]
fn reference_mission_segment_trace() {
    let mut scenario = Scenario::load(VEHICLES, None, MISSION).expect("scenario");
    let report = scenario.fly(&MissionOptions::default()).unwrap();

    // (kind, fuel burned lb, tolerance lb)
    let trace = [
        (ManeuverKind::Idle, 2.269, 0.01),
        (ManeuverKind::Irp, 6.423, 0.01),
        (ManeuverKind::McpClimb, 31.001, 0.01),
        (ManeuverKind::Cruise, 373.95, 2.0),
        (ManeuverKind::Loiter, 32.13, 0.3),
        (ManeuverKind::Hover, 4.60, 0.05),
        (ManeuverKind::Unload, 11.343, 0.01),
        (ManeuverKind::Hover, 3.706, 0.05),
        (ManeuverKind::McpClimb, 31.001, 0.01),
        (ManeuverKind::Cruise, 333.69, 2.0),
        (ManeuverKind::Hover, 3.479, 0.05),
        (ManeuverKind::Idle, 2.269, 0.01),
    ];
    assert_eq!(report.segments.len(), trace.len());
    for (segment, (kind, burned, tolerance)) in report.segments.iter().zip(trace) {
        assert_eq!(segment.kind, kind);
        assert_relative_eq!(segment.fuel_burned_lb, burned, epsilon = tolerance);
    }
    assert_relative_eq!(report.segments[2].distance_nm, 10.0, epsilon = 1e-9);
    assert_relative_eq!(report.segments[3].distance_nm, 160.0, epsilon = 1e-9);
}

#[test]
fn segments_burn_fuel_monotonically() {
    let mut scenario = Scenario::load(VEHICLES, None, MISSION).expect("scenario");
    let report = scenario.fly(&MissionOptions::default()).unwrap();
    let mut previous = 869.0;
    for segment in &report.segments {
        assert!(segment.fuel_burned_lb > 0.0);
        assert_relative_eq!(
            segment.fuel_remaining_lb,
            previous - segment.fuel_burned_lb,
            epsilon = 1e-9
        );
        previous = segment.fuel_remaining_lb;
    }
    assert_eq!(scenario.helicopter.state().payload_weight_lb(), 0.0);
}

#[test]
fn running_out_of_fuel_aborts_with_state_intact() {
    let mut heli = project();
    let maneuvers = [
        Maneuver::Idle { minutes: 10.0 },
        Maneuver::Idle { minutes: 1000.0 },
        Maneuver::Idle { minutes: 10.0 },
    ];
    let err = fly_mission(
        &mut heli,
        &maneuvers,
        &StandardAtmosphere,
        &MissionOptions::default(),
    )
    .unwrap_err();
    match err {
        MissionError::Segment {
            index: 1,
            kind: ManeuverKind::Idle,
            source: PerformanceError::State(StateError::InsufficientFuel { .. }),
        } => {}
        other => panic!("unexpected error: {other}"),
    }
    let after_first = 869.0 - heli.idle_fuel_flow() * 10.0 / 60.0;
    assert_relative_eq!(heli.state().fuel_weight_lb(), after_first, epsilon = 1e-9);
}

#[test]
fn failed_unload_changes_nothing() {
    let mut heli = project();
    let before = heli.state().clone();
    let maneuvers = [Maneuver::Unload {
        payload_lb: 2000.0,
        idle_minutes: 5.0,
    }];
    let err = fly_mission(
        &mut heli,
        &maneuvers,
        &StandardAtmosphere,
        &MissionOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MissionError::Segment {
            kind: ManeuverKind::Unload,
            ..
        }
    ));
    assert_eq!(heli.state(), &before);
}

#[test]
fn climb_credit_speed_sets_climb_distance() {
    let mut heli = project();
    let options = MissionOptions {
        climb_credit_speed_kt: 90.0,
        ..MissionOptions::default()
    };
    let report = fly_mission(
        &mut heli,
        &[Maneuver::McpClimb {
            minutes: 10.0,
            rate_of_climb_fpm: 1000.0,
        }],
        &StandardAtmosphere,
        &options,
    )
    .unwrap();
    assert_relative_eq!(report.range_nm, 15.0, epsilon = 1e-9);
}
