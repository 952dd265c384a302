//! Configuration models and loaders for the rotorcraft performance workspace.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub mod mission;
pub mod summary;
pub mod vehicle;

pub use mission::{ManeuverKind, ManeuverRecord};
pub use summary::{ConfigOverride, FieldSpec, OverrideOp, parse_summary};
pub use vehicle::{
    AirframeConfig, EngineConfig, LoadingConfig, RotorConfig, RotorRole, VehicleConfig,
};

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },
    #[error("missing required field `{0}`")]
    MissingField(String),
    #[error("unknown configuration field `{0}`")]
    UnknownField(String),
    #[error("summary line {line}: {reason}")]
    Summary { line: usize, reason: String },
    #[error("vehicle `{0}` not found in catalog")]
    NotFound(String),
    #[error("configuration catalog is empty")]
    EmptyCatalog,
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Load every vehicle configuration found at `path`.
///
/// A YAML file may hold a single vehicle or a list, a TOML file holds one vehicle, and
/// a directory is scanned for `*.toml` files in name order.
pub fn load_vehicle_configs<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, ConfigError> {
    load_records(path)
}

/// Load one vehicle from `path`, selecting by name when the source holds several.
pub fn load_vehicle_config<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<VehicleConfig, ConfigError> {
    select_vehicle(load_vehicle_configs(path)?, name)
}

/// Pick a vehicle from a loaded catalog. Without a name the first entry wins.
pub fn select_vehicle(
    vehicles: Vec<VehicleConfig>,
    name: Option<&str>,
) -> Result<VehicleConfig, ConfigError> {
    if vehicles.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    match name {
        None => vehicles.into_iter().next().ok_or(ConfigError::EmptyCatalog),
        Some(wanted) => vehicles
            .into_iter()
            .find(|vehicle| vehicle.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::NotFound(wanted.to_string())),
    }
}

/// Load a mission profile: an ordered list of maneuver records.
///
/// YAML files may be a bare list or a `maneuvers:` mapping; TOML files use a
/// `[[maneuvers]]` array of tables.
pub fn load_mission<P: AsRef<Path>>(path: P) -> Result<Vec<ManeuverRecord>, ConfigError> {
    let path = path.as_ref();
    let file: MissionFile = if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        MissionFile::Table(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        let value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
        if value.is_sequence() {
            MissionFile::List(serde_yaml::from_value(value)?)
        } else {
            MissionFile::Table(serde_yaml::from_value(value)?)
        }
    };
    Ok(file.into_records())
}

#[derive(Debug)]
enum MissionFile {
    List(Vec<ManeuverRecord>),
    Table(MissionTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MissionTable {
    maneuvers: Vec<ManeuverRecord>,
}

impl MissionFile {
    fn into_records(self) -> Vec<ManeuverRecord> {
        match self {
            MissionFile::List(records) => records,
            MissionFile::Table(table) => table.maneuvers,
        }
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        let value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
        if value.is_sequence() {
            Ok(serde_yaml::from_value(value)?)
        } else {
            Ok(vec![serde_yaml::from_value(value)?])
        }
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
