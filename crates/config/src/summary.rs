//! Human-readable vehicle summary, its parser, and override-based derivation.
//!
//! Every numeric field of [`VehicleConfig`] is registered once in [`FIELDS`] with its
//! dotted path, units, and summary group. The registry drives the summary printer, the
//! parser, and [`VehicleConfig::derive`], so the three can never disagree on naming.

use std::fmt;

use crate::vehicle::{
    AirframeConfig, EngineConfig, LoadingConfig, RotorConfig, VehicleConfig,
};
use crate::ConfigError;

const SEPARATOR: &str = "-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.";
const GROUPS: [&str; 4] = ["Main Rotor", "Tail Rotor", "Airframe", "Engine"];

/// One registered numeric configuration field.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub path: &'static str,
    pub units: &'static str,
    pub group: &'static str,
    get: fn(&VehicleConfig) -> f64,
    set: fn(&mut VehicleConfig, f64) -> Result<(), ConfigError>,
}

impl FieldSpec {
    pub fn get(&self, config: &VehicleConfig) -> f64 {
        (self.get)(config)
    }

    /// Assign without whole-config validation; callers validate once all edits land.
    pub fn set(&self, config: &mut VehicleConfig, value: f64) -> Result<(), ConfigError> {
        (self.set)(config, value)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("path", &self.path)
            .field("units", &self.units)
            .field("group", &self.group)
            .finish()
    }
}

macro_rules! field {
    ($path:literal, $units:literal, $group:literal, $($access:tt)+) => {
        FieldSpec {
            path: $path,
            units: $units,
            group: $group,
            get: |c| c.$($access)+,
            set: |c, v| {
                c.$($access)+ = v;
                Ok(())
            },
        }
    };
}

fn set_blade_count(
    path: &str,
    value: f64,
    target: &mut u32,
) -> Result<(), ConfigError> {
    if value.fract() != 0.0 || !(1.0..=u32::MAX as f64).contains(&value) {
        return Err(ConfigError::invalid(path, "must be a positive whole number"));
    }
    *target = value as u32;
    Ok(())
}

/// Registry of every numeric field, in summary order.
pub static FIELDS: &[FieldSpec] = &[
    field!("main_rotor.diameter_ft", "ft", "Main Rotor", main_rotor.diameter_ft),
    FieldSpec {
        path: "main_rotor.blade_count",
        units: "-",
        group: "Main Rotor",
        get: |c| c.main_rotor.blade_count as f64,
        set: |c, v| set_blade_count("main_rotor.blade_count", v, &mut c.main_rotor.blade_count),
    },
    field!("main_rotor.chord_in", "in", "Main Rotor", main_rotor.chord_in),
    field!("main_rotor.omega_rad_s", "rad/s", "Main Rotor", main_rotor.omega_rad_s),
    field!("main_rotor.cd0", "-", "Main Rotor", main_rotor.cd0),
    field!("tail_rotor.diameter_ft", "ft", "Tail Rotor", tail_rotor.diameter_ft),
    FieldSpec {
        path: "tail_rotor.blade_count",
        units: "-",
        group: "Tail Rotor",
        get: |c| c.tail_rotor.blade_count as f64,
        set: |c, v| set_blade_count("tail_rotor.blade_count", v, &mut c.tail_rotor.blade_count),
    },
    field!("tail_rotor.chord_in", "in", "Tail Rotor", tail_rotor.chord_in),
    field!("tail_rotor.omega_rad_s", "rad/s", "Tail Rotor", tail_rotor.omega_rad_s),
    field!("tail_rotor.cd0", "-", "Tail Rotor", tail_rotor.cd0),
    field!("airframe.download_fraction", "-", "Airframe", airframe.download_fraction),
    field!("airframe.ground_effect_factor", "-", "Airframe", airframe.ground_effect_factor),
    field!("airframe.flat_plate_area_ft2", "ft^2", "Airframe", airframe.flat_plate_area_ft2),
    field!("airframe.tail_arm_ft", "ft", "Airframe", airframe.tail_arm_ft),
    field!("airframe.fin_area_ft2", "ft^2", "Airframe", airframe.fin_area_ft2),
    field!("airframe.fin_lift_coefficient", "-", "Airframe", airframe.fin_lift_coefficient),
    field!("airframe.fin_aspect_ratio", "-", "Airframe", airframe.fin_aspect_ratio),
    field!("airframe.never_exceed_speed_kt", "kt", "Airframe", airframe.never_exceed_speed_kt),
    field!("loading.empty_weight_lb", "lb", "Airframe", loading.empty_weight_lb),
    field!("loading.fuel_weight_lb", "lb", "Airframe", loading.fuel_weight_lb),
    field!("loading.payload_weight_lb", "lb", "Airframe", loading.payload_weight_lb),
    field!(
        "engine.main_rotor_transmission_efficiency",
        "-",
        "Engine",
        engine.main_rotor_transmission_efficiency
    ),
    field!(
        "engine.tail_rotor_transmission_efficiency",
        "-",
        "Engine",
        engine.tail_rotor_transmission_efficiency
    ),
    field!(
        "engine.combining_gearbox_efficiency",
        "-",
        "Engine",
        engine.combining_gearbox_efficiency
    ),
    field!("engine.accessory_power_hp", "hp", "Engine", engine.accessory_power_hp),
    field!("engine.installation_efficiency", "-", "Engine", engine.installation_efficiency),
    field!("engine.transmission_limit_hp", "hp", "Engine", engine.transmission_limit_hp),
    field!("engine.rated_power_hp", "hp", "Engine", engine.rated_power_hp),
    field!("engine.idle_power_pct", "%", "Engine", engine.idle_power_pct),
    field!("engine.mcp_power_pct", "%", "Engine", engine.mcp_power_pct),
    field!("engine.irp_power_pct", "%", "Engine", engine.irp_power_pct),
    field!("engine.bsfc[0]", "lb/hp/hr", "Engine", engine.bsfc[0]),
    field!("engine.bsfc[1]", "lb/hp/hr/%", "Engine", engine.bsfc[1]),
    field!("engine.bsfc[2]", "lb/hp/hr/%^2", "Engine", engine.bsfc[2]),
    field!("engine.bsfc[3]", "lb/hp/hr/%^3", "Engine", engine.bsfc[3]),
    field!("engine.bsfc[4]", "lb/hp/hr/%^4", "Engine", engine.bsfc[4]),
    field!("engine.bsfc[5]", "lb/hp/hr/%^5", "Engine", engine.bsfc[5]),
];

/// Look up a registered field by its dotted path.
pub fn field(path: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.path == path)
}

/// How an override changes a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideOp {
    /// Replace the value.
    Set(f64),
    /// Multiply the current value.
    Scale(f64),
}

/// Named-field edit applied by [`VehicleConfig::derive`].
///
/// A path that names a field group prefix such as `engine.bsfc` applies to every
/// indexed member of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOverride {
    pub path: String,
    pub op: OverrideOp,
}

impl ConfigOverride {
    pub fn set(path: impl Into<String>, value: f64) -> Self {
        Self {
            path: path.into(),
            op: OverrideOp::Set(value),
        }
    }

    pub fn scale(path: impl Into<String>, factor: f64) -> Self {
        Self {
            path: path.into(),
            op: OverrideOp::Scale(factor),
        }
    }

    fn targets(&self) -> Vec<&'static FieldSpec> {
        if let Some(spec) = field(&self.path) {
            return vec![spec];
        }
        let indexed = format!("{}[", self.path);
        FIELDS
            .iter()
            .filter(|spec| spec.path.starts_with(&indexed))
            .collect()
    }
}

impl VehicleConfig {
    /// Read a registered field by dotted path.
    pub fn field_value(&self, path: &str) -> Result<f64, ConfigError> {
        field(path)
            .map(|spec| spec.get(self))
            .ok_or_else(|| ConfigError::UnknownField(path.to_string()))
    }

    /// Copy this configuration with the overrides applied in order, then validate.
    ///
    /// The receiver is left untouched; the derived copy keeps the same name unless
    /// renamed with [`VehicleConfig::with_name`].
    pub fn derive(&self, overrides: &[ConfigOverride]) -> Result<VehicleConfig, ConfigError> {
        let mut derived = self.clone();
        for edit in overrides {
            let targets = edit.targets();
            if targets.is_empty() {
                return Err(ConfigError::UnknownField(edit.path.clone()));
            }
            for spec in targets {
                let value = match edit.op {
                    OverrideOp::Set(value) => value,
                    OverrideOp::Scale(factor) => spec.get(&derived) * factor,
                };
                spec.set(&mut derived, value)?;
            }
        }
        derived.validate()?;
        Ok(derived)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, ConfigError> {
        self.name = name.into();
        self.validate()?;
        Ok(self)
    }

    /// Render the fixed-format summary shown by [`fmt::Display`].
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VehicleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "{:^width$}", self.name, width = SEPARATOR.len())?;
        writeln!(f, "{SEPARATOR}")?;
        for group in GROUPS {
            writeln!(f)?;
            writeln!(f, "{group}")?;
            for spec in FIELDS.iter().filter(|spec| spec.group == group) {
                writeln!(f, "{:>36}: {} [{}]", spec.path, spec.get(self), spec.units)?;
            }
        }
        Ok(())
    }
}

/// Parse a summary produced by [`VehicleConfig::summary`] back into a configuration.
///
/// Every registered field must be present exactly once.
pub fn parse_summary(text: &str) -> Result<VehicleConfig, ConfigError> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    expect_separator(&mut lines)?;
    let name = match lines.next() {
        Some((_, line)) => line.trim().to_string(),
        None => {
            return Err(ConfigError::Summary {
                line: 0,
                reason: "missing vehicle name".to_string(),
            });
        }
    };
    expect_separator(&mut lines)?;

    let mut values: Vec<Option<f64>> = vec![None; FIELDS.len()];
    for (line_no, raw) in lines {
        let line = raw.trim();
        if line.is_empty() || GROUPS.contains(&line) {
            continue;
        }
        let (path, rest) = line.split_once(": ").ok_or_else(|| ConfigError::Summary {
            line: line_no,
            reason: format!("expected `path: value [units]`, got `{line}`"),
        })?;
        let value_text = rest
            .split_once(" [")
            .filter(|(_, units)| units.ends_with(']'))
            .map(|(value, _)| value)
            .ok_or_else(|| ConfigError::Summary {
                line: line_no,
                reason: "missing units".to_string(),
            })?;
        let value: f64 = value_text.trim().parse().map_err(|_| ConfigError::Summary {
            line: line_no,
            reason: format!("`{value_text}` is not a number"),
        })?;

        let idx = FIELDS
            .iter()
            .position(|spec| spec.path == path.trim())
            .ok_or_else(|| ConfigError::UnknownField(path.trim().to_string()))?;
        if values[idx].replace(value).is_some() {
            return Err(ConfigError::Summary {
                line: line_no,
                reason: format!("`{}` appears twice", FIELDS[idx].path),
            });
        }
    }

    let mut config = VehicleConfig {
        name,
        main_rotor: placeholder_rotor(),
        tail_rotor: placeholder_rotor(),
        airframe: AirframeConfig::default(),
        engine: EngineConfig::default(),
        loading: LoadingConfig::default(),
    };
    for (spec, value) in FIELDS.iter().zip(values) {
        let value = value.ok_or_else(|| ConfigError::MissingField(spec.path.to_string()))?;
        spec.set(&mut config, value)?;
    }
    config.validate()?;
    Ok(config)
}

fn expect_separator<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<(), ConfigError> {
    match lines.next() {
        Some((_, line)) if line.trim() == SEPARATOR => Ok(()),
        Some((line, _)) => Err(ConfigError::Summary {
            line,
            reason: "expected separator".to_string(),
        }),
        None => Err(ConfigError::Summary {
            line: 0,
            reason: "summary is truncated".to_string(),
        }),
    }
}

fn placeholder_rotor() -> RotorConfig {
    RotorConfig {
        diameter_ft: 1.0,
        blade_count: 1,
        chord_in: 1.0,
        omega_rad_s: 1.0,
        cd0: 0.01,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> VehicleConfig {
        VehicleConfig::new(
            "Project Helicopter",
            RotorConfig {
                diameter_ft: 35.0,
                blade_count: 4,
                chord_in: 10.4,
                omega_rad_s: 43.2,
                cd0: 0.008,
            },
            RotorConfig {
                diameter_ft: 5.42,
                blade_count: 4,
                chord_in: 7.0,
                omega_rad_s: 239.85,
                cd0: 0.015,
            },
            AirframeConfig {
                flat_plate_area_ft2: 12.9,
                tail_arm_ft: 21.21,
                fin_area_ft2: 20.92,
                fin_lift_coefficient: 0.22,
                ..AirframeConfig::default()
            },
            EngineConfig::default(),
            LoadingConfig {
                empty_weight_lb: 2853.0,
                fuel_weight_lb: 869.0,
                payload_weight_lb: 1278.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn summary_lists_every_field_under_its_group() {
        let text = project().summary();
        assert!(text.contains("Project Helicopter"));
        assert!(text.contains(&format!("{:>36}: 35 [ft]", "main_rotor.diameter_ft")));
        assert!(text.contains("engine.bsfc[1]: -0.08754 [lb/hp/hr/%]"));
        for group in GROUPS {
            assert!(text.lines().any(|line| line == group), "{group}");
        }
        assert_eq!(
            text.lines().filter(|line| line.contains(": ")).count(),
            FIELDS.len()
        );
    }

    #[test]
    fn summary_round_trips() {
        let config = project();
        assert_eq!(parse_summary(&config.summary()).unwrap(), config);
    }

    #[test]
    fn parse_rejects_missing_field() {
        let text: String = project()
            .summary()
            .lines()
            .filter(|line| !line.contains("engine.rated_power_hp"))
            .map(|line| format!("{line}\n"))
            .collect();
        assert!(matches!(
            parse_summary(&text),
            Err(ConfigError::MissingField(path)) if path == "engine.rated_power_hp"
        ));
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let mut text = project().summary();
        text.push_str("           airframe.wing_area_ft2: 3 [ft^2]\n");
        assert!(matches!(
            parse_summary(&text),
            Err(ConfigError::UnknownField(_))
        ));
    }

    #[test]
    fn derive_scales_bsfc_group_and_keeps_original() {
        let base = project();
        let derived = base
            .derive(&[
                ConfigOverride::scale("engine.bsfc", 0.97),
                ConfigOverride::scale("main_rotor.cd0", 0.95),
                ConfigOverride::set("airframe.flat_plate_area_ft2", 10.0),
            ])
            .unwrap()
            .with_name("Improved")
            .unwrap();
        assert_eq!(base.engine.bsfc[0], 1.839);
        assert!((derived.engine.bsfc[0] - 1.839 * 0.97).abs() < 1e-12);
        assert!((derived.engine.bsfc[5] - -8.331e-10 * 0.97).abs() < 1e-20);
        assert!((derived.main_rotor.cd0 - 0.0076).abs() < 1e-12);
        assert_eq!(derived.airframe.flat_plate_area_ft2, 10.0);
        assert_eq!(derived.name, "Improved");
    }

    #[test]
    fn derive_validates_result() {
        let base = project();
        assert!(matches!(
            base.derive(&[ConfigOverride::set("main_rotor.diameter_ft", -1.0)]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            base.derive(&[ConfigOverride::set("main_rotor.blade_count", 2.5)]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            base.derive(&[ConfigOverride::set("rotor.mass", 1.0)]),
            Err(ConfigError::UnknownField(_))
        ));
    }
}
