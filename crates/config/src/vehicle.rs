//! Vehicle configuration records: rotor geometry, airframe, engine, and initial loading.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which rotor a [`RotorConfig`] describes. Selects the defaults applied to omitted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotorRole {
    Main,
    Tail,
}

impl RotorRole {
    fn section(self) -> &'static str {
        match self {
            RotorRole::Main => "main_rotor",
            RotorRole::Tail => "tail_rotor",
        }
    }
}

/// Constant-chord rotor geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotorConfig {
    pub diameter_ft: f64,
    pub blade_count: u32,
    /// Equivalent blade chord (in).
    pub chord_in: f64,
    pub omega_rad_s: f64,
    /// Section profile-drag coefficient.
    pub cd0: f64,
}

impl RotorConfig {
    pub fn radius_ft(&self) -> f64 {
        self.diameter_ft / 2.0
    }

    pub fn disk_area_ft2(&self) -> f64 {
        PI * self.radius_ft().powi(2)
    }

    pub fn tip_speed_ft_s(&self) -> f64 {
        self.omega_rad_s * self.radius_ft()
    }

    /// Blade area over disk area.
    pub fn solidity(&self) -> f64 {
        self.blade_count as f64 * self.chord_in / (12.0 * PI * self.radius_ft())
    }

    /// Blade aspect ratio R/c.
    pub fn aspect_ratio(&self) -> f64 {
        12.0 * self.radius_ft() / self.chord_in
    }

    fn validate(&self, role: RotorRole) -> Result<(), ConfigError> {
        let section = role.section();
        positive(section, "diameter_ft", self.diameter_ft)?;
        if self.blade_count == 0 {
            return Err(ConfigError::invalid(
                format!("{section}.blade_count"),
                "must be at least 1",
            ));
        }
        positive(section, "chord_in", self.chord_in)?;
        positive(section, "omega_rad_s", self.omega_rad_s)?;
        positive(section, "cd0", self.cd0)?;
        Ok(())
    }
}

/// Airframe drag, download, and tail geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AirframeConfig {
    /// Rotor-wake download on the fuselage as a fraction of weight.
    pub download_fraction: f64,
    /// Thrust augmentation in ground effect (≥ 1).
    pub ground_effect_factor: f64,
    /// Equivalent flat-plate drag area (ft²).
    pub flat_plate_area_ft2: f64,
    /// Main-rotor shaft to tail-rotor thrust line (ft).
    pub tail_arm_ft: f64,
    pub fin_area_ft2: f64,
    pub fin_lift_coefficient: f64,
    pub fin_aspect_ratio: f64,
    pub never_exceed_speed_kt: f64,
}

impl Default for AirframeConfig {
    fn default() -> Self {
        Self {
            download_fraction: 0.03,
            ground_effect_factor: 1.2,
            flat_plate_area_ft2: 5.0,
            tail_arm_ft: 15.0,
            fin_area_ft2: 15.0,
            fin_lift_coefficient: 0.1,
            fin_aspect_ratio: 3.0,
            never_exceed_speed_kt: 160.0,
        }
    }
}

impl AirframeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.download_fraction) {
            return Err(ConfigError::invalid(
                "airframe.download_fraction",
                "must lie in [0, 1)",
            ));
        }
        if !(self.ground_effect_factor >= 1.0) || !self.ground_effect_factor.is_finite() {
            return Err(ConfigError::invalid(
                "airframe.ground_effect_factor",
                "must be at least 1",
            ));
        }
        positive("airframe", "flat_plate_area_ft2", self.flat_plate_area_ft2)?;
        positive("airframe", "tail_arm_ft", self.tail_arm_ft)?;
        positive("airframe", "fin_area_ft2", self.fin_area_ft2)?;
        if !self.fin_lift_coefficient.is_finite() || self.fin_lift_coefficient < 0.0 {
            return Err(ConfigError::invalid(
                "airframe.fin_lift_coefficient",
                "must be non-negative",
            ));
        }
        positive("airframe", "fin_aspect_ratio", self.fin_aspect_ratio)?;
        positive("airframe", "never_exceed_speed_kt", self.never_exceed_speed_kt)?;
        Ok(())
    }
}

/// Drivetrain efficiencies, power limits, rating settings, and the normalised BSFC curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub main_rotor_transmission_efficiency: f64,
    pub tail_rotor_transmission_efficiency: f64,
    pub combining_gearbox_efficiency: f64,
    pub accessory_power_hp: f64,
    pub installation_efficiency: f64,
    pub transmission_limit_hp: f64,
    pub rated_power_hp: f64,
    pub idle_power_pct: f64,
    pub mcp_power_pct: f64,
    pub irp_power_pct: f64,
    /// BSFC polynomial coefficients in percent rated power, lowest order first.
    pub bsfc: [f64; 6],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            main_rotor_transmission_efficiency: 0.985,
            tail_rotor_transmission_efficiency: 0.9712,
            combining_gearbox_efficiency: 0.986,
            accessory_power_hp: 10.0,
            installation_efficiency: 0.95,
            transmission_limit_hp: 674.0,
            rated_power_hp: 813.0,
            idle_power_pct: 20.0,
            mcp_power_pct: 95.0,
            irp_power_pct: 100.0,
            bsfc: [1.839, -8.754e-2, 2.52e-3, -3.77e-5, 2.822e-7, -8.331e-10],
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        efficiency(
            "main_rotor_transmission_efficiency",
            self.main_rotor_transmission_efficiency,
        )?;
        efficiency(
            "tail_rotor_transmission_efficiency",
            self.tail_rotor_transmission_efficiency,
        )?;
        efficiency(
            "combining_gearbox_efficiency",
            self.combining_gearbox_efficiency,
        )?;
        efficiency("installation_efficiency", self.installation_efficiency)?;
        if !self.accessory_power_hp.is_finite() || self.accessory_power_hp < 0.0 {
            return Err(ConfigError::invalid(
                "engine.accessory_power_hp",
                "must be non-negative",
            ));
        }
        positive("engine", "transmission_limit_hp", self.transmission_limit_hp)?;
        positive("engine", "rated_power_hp", self.rated_power_hp)?;
        positive("engine", "idle_power_pct", self.idle_power_pct)?;
        positive("engine", "mcp_power_pct", self.mcp_power_pct)?;
        positive("engine", "irp_power_pct", self.irp_power_pct)?;
        if let Some(idx) = self.bsfc.iter().position(|c| !c.is_finite()) {
            return Err(ConfigError::invalid(
                format!("engine.bsfc[{idx}]"),
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Initial weight breakdown used to seed the vehicle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingConfig {
    pub empty_weight_lb: f64,
    pub fuel_weight_lb: f64,
    pub payload_weight_lb: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            empty_weight_lb: 1000.0,
            fuel_weight_lb: 0.0,
            payload_weight_lb: 0.0,
        }
    }
}

impl LoadingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("loading", "empty_weight_lb", self.empty_weight_lb)?;
        for (name, value) in [
            ("fuel_weight_lb", self.fuel_weight_lb),
            ("payload_weight_lb", self.payload_weight_lb),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    format!("loading.{name}"),
                    "must be non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// Complete single-main-rotor helicopter description.
///
/// Construct through deserialisation, [`VehicleConfig::new`], or
/// [`VehicleConfig::derive`]; all three validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VehicleConfigFile")]
pub struct VehicleConfig {
    pub name: String,
    pub main_rotor: RotorConfig,
    pub tail_rotor: RotorConfig,
    pub airframe: AirframeConfig,
    pub engine: EngineConfig,
    pub loading: LoadingConfig,
}

impl VehicleConfig {
    /// Assemble and validate a configuration from its sections.
    pub fn new(
        name: impl Into<String>,
        main_rotor: RotorConfig,
        tail_rotor: RotorConfig,
        airframe: AirframeConfig,
        engine: EngineConfig,
        loading: LoadingConfig,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            name: name.into(),
            main_rotor,
            tail_rotor,
            airframe,
            engine,
            loading,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant; the first violation is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("name", "must not be blank"));
        }
        // The summary block centres the name on one line and reads it back trimmed.
        if self.name.trim() != self.name || self.name.contains(['\n', '\r']) {
            return Err(ConfigError::invalid(
                "name",
                "must be a single line without leading or trailing whitespace",
            ));
        }
        self.main_rotor.validate(RotorRole::Main)?;
        self.tail_rotor.validate(RotorRole::Tail)?;
        self.airframe.validate()?;
        self.engine.validate()?;
        self.loading.validate()?;
        Ok(())
    }
}

/// On-disk form of a rotor section; every field optional so role defaults can apply.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotorConfigFile {
    pub diameter_ft: Option<f64>,
    pub blade_count: Option<u32>,
    pub chord_in: Option<f64>,
    pub omega_rad_s: Option<f64>,
    pub cd0: Option<f64>,
}

impl RotorConfigFile {
    /// Apply role defaults. The diameter has no default.
    pub fn resolve(self, role: RotorRole) -> Result<RotorConfig, ConfigError> {
        let (chord_in, omega_rad_s, cd0) = match role {
            RotorRole::Main => (10.4, 43.2, 0.008),
            RotorRole::Tail => (6.0, 20.0, 0.015),
        };
        let diameter_ft = self
            .diameter_ft
            .ok_or_else(|| ConfigError::MissingField(format!("{}.diameter_ft", role.section())))?;
        Ok(RotorConfig {
            diameter_ft,
            blade_count: self.blade_count.unwrap_or(2),
            chord_in: self.chord_in.unwrap_or(chord_in),
            omega_rad_s: self.omega_rad_s.unwrap_or(omega_rad_s),
            cd0: self.cd0.unwrap_or(cd0),
        })
    }
}

/// On-disk form of [`VehicleConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfigFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main_rotor: RotorConfigFile,
    #[serde(default)]
    pub tail_rotor: RotorConfigFile,
    #[serde(default)]
    pub airframe: AirframeConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

impl TryFrom<VehicleConfigFile> for VehicleConfig {
    type Error = ConfigError;

    fn try_from(file: VehicleConfigFile) -> Result<Self, Self::Error> {
        VehicleConfig::new(
            file.name.unwrap_or_else(|| "Unnamed Helicopter".to_string()),
            file.main_rotor.resolve(RotorRole::Main)?,
            file.tail_rotor.resolve(RotorRole::Tail)?,
            file.airframe,
            file.engine,
            file.loading,
        )
    }
}

fn positive(section: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            format!("{section}.{field}"),
            "must be strictly positive",
        ))
    }
}

fn efficiency(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            format!("engine.{field}"),
            "must lie in (0, 1]",
        ))
    }
}
