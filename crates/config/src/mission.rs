//! Mission profile records as they appear in YAML/TOML files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Segment type of a mission file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    Idle,
    Irp,
    McpClimb,
    Cruise,
    Hover,
    Loiter,
    Unload,
    Climb,
}

impl ManeuverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ManeuverKind::Idle => "idle",
            ManeuverKind::Irp => "irp",
            ManeuverKind::McpClimb => "mcp_climb",
            ManeuverKind::Cruise => "cruise",
            ManeuverKind::Hover => "hover",
            ManeuverKind::Loiter => "loiter",
            ManeuverKind::Unload => "unload",
            ManeuverKind::Climb => "climb",
        }
    }
}

impl fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mission segment in file form.
///
/// `duration` is in minutes except for `cruise`, where it is the distance in nautical
/// miles. `value` carries the airspeed (kt) for cruise and loiter, the rate of climb
/// (ft/min) for climbs, and the payload dropped (lb) for unload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManeuverRecord {
    pub kind: ManeuverKind,
    #[serde(default)]
    pub altitude_ft: f64,
    pub duration: f64,
    #[serde(default)]
    pub value: Option<f64>,
}

impl ManeuverRecord {
    pub fn new(kind: ManeuverKind, altitude_ft: f64, duration: f64, value: Option<f64>) -> Self {
        Self {
            kind,
            altitude_ft,
            duration,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_records_use_snake_case_kinds() {
        let records: Vec<ManeuverRecord> = serde_yaml::from_str(
            "- {kind: mcp_climb, duration: 5, value: 1000}\n\
             - {kind: cruise, altitude_ft: 5000, duration: 160, value: 110}\n",
        )
        .unwrap();
        assert_eq!(records[0].kind, ManeuverKind::McpClimb);
        assert_eq!(records[0].altitude_ft, 0.0);
        assert_eq!(records[1].value, Some(110.0));
        assert_eq!(records[1].kind.to_string(), "cruise");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let parsed: Result<Vec<ManeuverRecord>, _> =
            serde_yaml::from_str("- {kind: autorotate, duration: 1}\n");
        assert!(parsed.is_err());
    }
}
