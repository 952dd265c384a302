//! Sequential mission fuel-burn stepper.

pub mod maneuver;

pub use maneuver::{Maneuver, RecordError};

use rotor_atmosphere::AtmosphereProvider;
use rotor_config::{ManeuverKind, ManeuverRecord};
use rotor_core::time::minutes_to_hours;
use rotor_propulsion::{PerformanceWarning, Rating};
use serde::Serialize;

use crate::forward::ForwardFlightOptions;
use crate::helicopter::{Helicopter, PerformanceError};
use crate::hover::{GroundEffect, HoverOptions};

/// Top-level mission error.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("segment {index} ({kind}) failed: {source}")]
    Segment {
        index: usize,
        kind: ManeuverKind,
        #[source]
        source: PerformanceError,
    },
    #[error("mission record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Knobs shared by every segment of a mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionOptions {
    /// Ground speed credited during MCP climbs (kt).
    pub climb_credit_speed_kt: f64,
    pub hover: HoverOptions,
    pub forward_flight: ForwardFlightOptions,
}

impl Default for MissionOptions {
    fn default() -> Self {
        Self {
            climb_credit_speed_kt: 120.0,
            hover: HoverOptions::default(),
            forward_flight: ForwardFlightOptions::default(),
        }
    }
}

/// Outcome of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub index: usize,
    pub kind: ManeuverKind,
    pub fuel_burned_lb: f64,
    pub fuel_remaining_lb: f64,
    pub gross_weight_lb: f64,
    pub distance_nm: f64,
    pub warnings: Vec<PerformanceWarning>,
}

/// Whole-mission totals plus the per-segment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    pub segments: Vec<SegmentReport>,
    pub fuel_burned_lb: f64,
    pub fuel_remaining_lb: f64,
    pub range_nm: f64,
    pub final_gross_weight_lb: f64,
}

/// Convert file records into typed maneuvers, reporting the first bad record.
pub fn maneuvers_from_records(records: &[ManeuverRecord]) -> Result<Vec<Maneuver>, MissionError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Maneuver::try_from(record).map_err(|err| MissionError::InvalidRecord {
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Fly `maneuvers` in order, burning fuel from the helicopter's state.
///
/// The first failing segment aborts the mission; the state is left as it was after the
/// last successful segment.
pub fn fly_mission<A: AtmosphereProvider>(
    helicopter: &mut Helicopter,
    maneuvers: &[Maneuver],
    atmosphere: &A,
    options: &MissionOptions,
) -> Result<MissionReport, MissionError> {
    let starting_fuel = helicopter.state().fuel_weight_lb();
    let mut segments = Vec::with_capacity(maneuvers.len());
    let mut range_nm = 0.0;

    for (index, maneuver) in maneuvers.iter().enumerate() {
        let kind = maneuver.kind();
        let segment = step(helicopter, maneuver, atmosphere, options).map_err(|source| {
            MissionError::Segment {
                index,
                kind,
                source,
            }
        })?;
        range_nm += segment.distance_nm;

        let state = helicopter.state();
        tracing::info!(
            index,
            kind = %kind,
            fuel_burned_lb = segment.fuel_lb,
            fuel_remaining_lb = state.fuel_weight_lb(),
            gross_weight_lb = state.gross_weight_lb(),
            distance_nm = segment.distance_nm,
            "segment complete"
        );
        segments.push(SegmentReport {
            index,
            kind,
            fuel_burned_lb: segment.fuel_lb,
            fuel_remaining_lb: state.fuel_weight_lb(),
            gross_weight_lb: state.gross_weight_lb(),
            distance_nm: segment.distance_nm,
            warnings: segment.warnings,
        });
    }

    let state = helicopter.state();
    tracing::info!(
        fuel_remaining_lb = state.fuel_weight_lb(),
        range_nm,
        "mission complete"
    );
    Ok(MissionReport {
        segments,
        fuel_burned_lb: starting_fuel - state.fuel_weight_lb(),
        fuel_remaining_lb: state.fuel_weight_lb(),
        range_nm,
        final_gross_weight_lb: state.gross_weight_lb(),
    })
}

struct SegmentOutcome {
    fuel_lb: f64,
    distance_nm: f64,
    warnings: Vec<PerformanceWarning>,
}

impl SegmentOutcome {
    fn burn(fuel_lb: f64) -> Self {
        Self {
            fuel_lb,
            distance_nm: 0.0,
            warnings: Vec::new(),
        }
    }
}

fn step<A: AtmosphereProvider>(
    helicopter: &mut Helicopter,
    maneuver: &Maneuver,
    atmosphere: &A,
    options: &MissionOptions,
) -> Result<SegmentOutcome, PerformanceError> {
    let outcome = match *maneuver {
        Maneuver::Idle { minutes } => {
            SegmentOutcome::burn(helicopter.idle_fuel_flow() * minutes_to_hours(minutes))
        }
        Maneuver::Irp { minutes } => SegmentOutcome::burn(
            helicopter.rating_fuel_flow(Rating::Irp) * minutes_to_hours(minutes),
        ),
        Maneuver::McpClimb { minutes, .. } => {
            let hours = minutes_to_hours(minutes);
            SegmentOutcome {
                fuel_lb: helicopter.rating_fuel_flow(Rating::Mcp) * hours,
                distance_nm: options.climb_credit_speed_kt * hours,
                warnings: Vec::new(),
            }
        }
        Maneuver::Cruise {
            altitude_ft,
            distance_nm,
            airspeed_kt,
        } => {
            let point = atmosphere.at(altitude_ft)?;
            let table = helicopter.forward_flight(&point, airspeed_kt, &options.forward_flight)?;
            let row = single_row(table.rows)?;
            if !(row.specific_range_nm_per_lb > 0.0) {
                return Err(PerformanceError::InvalidConfiguration(format!(
                    "no positive specific range at {airspeed_kt} kt"
                )));
            }
            SegmentOutcome {
                fuel_lb: distance_nm / row.specific_range_nm_per_lb,
                distance_nm,
                warnings: row.warnings,
            }
        }
        Maneuver::Loiter {
            altitude_ft,
            minutes,
            airspeed_kt,
        } => {
            let point = atmosphere.at(altitude_ft)?;
            let table = helicopter.forward_flight(&point, airspeed_kt, &options.forward_flight)?;
            let row = single_row(table.rows)?;
            SegmentOutcome {
                fuel_lb: row.fuel_flow_lb_hr * minutes_to_hours(minutes),
                distance_nm: 0.0,
                warnings: row.warnings,
            }
        }
        Maneuver::Hover {
            altitude_ft,
            minutes,
        } => hover_segment(helicopter, atmosphere, altitude_ft, minutes, 0.0, options)?,
        Maneuver::Climb {
            altitude_ft,
            minutes,
            rate_of_climb_fpm,
        } => hover_segment(
            helicopter,
            atmosphere,
            altitude_ft,
            minutes,
            rate_of_climb_fpm,
            options,
        )?,
        Maneuver::Unload {
            payload_lb,
            idle_minutes,
        } => {
            let mut state = helicopter.state().clone();
            state.unload(payload_lb)?;
            let fuel_lb = helicopter.idle_fuel_flow() * minutes_to_hours(idle_minutes);
            state.burn(fuel_lb)?;
            *helicopter.state_mut() = state;
            return Ok(SegmentOutcome::burn(fuel_lb));
        }
    };

    helicopter.burn(outcome.fuel_lb)?;
    Ok(outcome)
}

fn hover_segment<A: AtmosphereProvider>(
    helicopter: &Helicopter,
    atmosphere: &A,
    altitude_ft: f64,
    minutes: f64,
    rate_of_climb_fpm: f64,
    options: &MissionOptions,
) -> Result<SegmentOutcome, PerformanceError> {
    let point = atmosphere.at(altitude_ft)?;
    let hover_options = HoverOptions {
        ground_effect: GroundEffect::OutOfGroundEffect,
        rate_of_climb_fpm,
        ..options.hover
    };
    let record = helicopter.hover(&point, &hover_options)?;
    Ok(SegmentOutcome {
        fuel_lb: record.sfc_lb_per_hp_hr * record.shp_uninstalled * minutes_to_hours(minutes),
        distance_nm: 0.0,
        warnings: record.warnings,
    })
}

fn single_row(
    rows: Vec<crate::forward::ForwardFlightRow>,
) -> Result<crate::forward::ForwardFlightRow, PerformanceError> {
    rows.into_iter().next().ok_or_else(|| {
        PerformanceError::InvalidConfiguration("forward flight produced no rows".to_string())
    })
}
