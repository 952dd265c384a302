//! Typed mission segments converted from file records.

use rotor_config::{ManeuverKind, ManeuverRecord};
use serde::Serialize;
use thiserror::Error;

/// One mission segment. Durations are minutes; `Cruise` carries a distance instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Maneuver {
    Idle {
        minutes: f64,
    },
    Irp {
        minutes: f64,
    },
    McpClimb {
        minutes: f64,
        rate_of_climb_fpm: f64,
    },
    Cruise {
        altitude_ft: f64,
        distance_nm: f64,
        airspeed_kt: f64,
    },
    Loiter {
        altitude_ft: f64,
        minutes: f64,
        airspeed_kt: f64,
    },
    Hover {
        altitude_ft: f64,
        minutes: f64,
    },
    Climb {
        altitude_ft: f64,
        minutes: f64,
        rate_of_climb_fpm: f64,
    },
    Unload {
        payload_lb: f64,
        idle_minutes: f64,
    },
}

impl Maneuver {
    pub fn kind(&self) -> ManeuverKind {
        match self {
            Maneuver::Idle { .. } => ManeuverKind::Idle,
            Maneuver::Irp { .. } => ManeuverKind::Irp,
            Maneuver::McpClimb { .. } => ManeuverKind::McpClimb,
            Maneuver::Cruise { .. } => ManeuverKind::Cruise,
            Maneuver::Loiter { .. } => ManeuverKind::Loiter,
            Maneuver::Hover { .. } => ManeuverKind::Hover,
            Maneuver::Climb { .. } => ManeuverKind::Climb,
            Maneuver::Unload { .. } => ManeuverKind::Unload,
        }
    }
}

/// Why a file record cannot become a [`Maneuver`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("`{kind}` requires a value ({meaning})")]
    MissingValue {
        kind: ManeuverKind,
        meaning: &'static str,
    },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("airspeed must be positive, got {0} kt")]
    NonPositiveAirspeed(f64),
}

impl TryFrom<&ManeuverRecord> for Maneuver {
    type Error = RecordError;

    fn try_from(record: &ManeuverRecord) -> Result<Self, Self::Error> {
        let duration = non_negative("duration", record.duration)?;
        if !record.altitude_ft.is_finite() {
            return Err(RecordError::Negative {
                field: "altitude_ft",
                value: record.altitude_ft,
            });
        }
        let altitude_ft = record.altitude_ft;
        let require = |meaning: &'static str| {
            record.value.ok_or(RecordError::MissingValue {
                kind: record.kind,
                meaning,
            })
        };

        Ok(match record.kind {
            ManeuverKind::Idle => Maneuver::Idle { minutes: duration },
            ManeuverKind::Irp => Maneuver::Irp { minutes: duration },
            ManeuverKind::McpClimb => Maneuver::McpClimb {
                minutes: duration,
                rate_of_climb_fpm: record.value.unwrap_or(0.0),
            },
            ManeuverKind::Cruise => Maneuver::Cruise {
                altitude_ft,
                distance_nm: duration,
                airspeed_kt: airspeed(require("airspeed in kt")?)?,
            },
            ManeuverKind::Loiter => Maneuver::Loiter {
                altitude_ft,
                minutes: duration,
                airspeed_kt: airspeed(require("airspeed in kt")?)?,
            },
            ManeuverKind::Hover => Maneuver::Hover {
                altitude_ft,
                minutes: duration,
            },
            ManeuverKind::Climb => {
                let rate = require("rate of climb in ft/min")?;
                if !rate.is_finite() {
                    return Err(RecordError::Negative {
                        field: "rate_of_climb_fpm",
                        value: rate,
                    });
                }
                Maneuver::Climb {
                    altitude_ft,
                    minutes: duration,
                    rate_of_climb_fpm: rate,
                }
            }
            ManeuverKind::Unload => Maneuver::Unload {
                payload_lb: non_negative("payload_lb", require("payload in lb")?)?,
                idle_minutes: duration,
            },
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RecordError::Negative { field, value })
    }
}

fn airspeed(value: f64) -> Result<f64, RecordError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RecordError::NonPositiveAirspeed(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cruise_record_maps_duration_to_distance() {
        let record = ManeuverRecord::new(ManeuverKind::Cruise, 5000.0, 160.0, Some(110.0));
        assert_eq!(
            Maneuver::try_from(&record).unwrap(),
            Maneuver::Cruise {
                altitude_ft: 5000.0,
                distance_nm: 160.0,
                airspeed_kt: 110.0
            }
        );
    }

    #[test]
    fn unload_requires_payload() {
        let record = ManeuverRecord::new(ManeuverKind::Unload, 0.0, 5.0, None);
        assert!(matches!(
            Maneuver::try_from(&record),
            Err(RecordError::MissingValue { .. })
        ));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let record = ManeuverRecord::new(ManeuverKind::Hover, 0.0, -1.0, None);
        assert!(matches!(
            Maneuver::try_from(&record),
            Err(RecordError::Negative { field: "duration", .. })
        ));
    }

    #[test]
    fn mcp_climb_rate_defaults_to_zero() {
        let record = ManeuverRecord::new(ManeuverKind::McpClimb, 0.0, 5.0, None);
        assert_eq!(
            Maneuver::try_from(&record).unwrap().kind(),
            ManeuverKind::McpClimb
        );
    }
}
