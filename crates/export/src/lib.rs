//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod table {
    use std::io::Write;
    use std::path::Path;

    use rotor_performance::{ForwardFlightRow, ForwardFlightTable, MissionReport};

    use super::{ExportError, writer_for_path};

    /// Forward-flight CSV columns, in output order.
    pub const FORWARD_FLIGHT_COLUMNS: [&str; 29] = [
        "airspeed_kt",
        "dynamic_pressure_psf",
        "advance_ratio",
        "induced_velocity_ft_s",
        "ct_over_sigma",
        "stall_drag_increment",
        "drag_divergence_mach",
        "advancing_tip_mach",
        "compressibility_drag_increment",
        "profile_drag_coefficient",
        "induced_hp",
        "profile_hp",
        "parasite_hp",
        "main_rotor_hp",
        "main_rotor_torque_ft_lb",
        "antitorque_thrust_lb",
        "fin_lift_lb",
        "fin_induced_drag_lb",
        "tail_rotor_thrust_lb",
        "tail_rotor_induced_velocity_ft_s",
        "tail_rotor_hp",
        "shp_installed",
        "shp_uninstalled",
        "lift_to_drag",
        "power_pct",
        "sfc_lb_per_hp_hr",
        "fuel_flow_lb_hr",
        "specific_range_nm_per_lb",
        "rate_of_climb_fpm",
    ];

    pub const MISSION_COLUMNS: [&str; 6] = [
        "index",
        "kind",
        "fuel_burned_lb",
        "fuel_remaining_lb",
        "gross_weight_lb",
        "distance_nm",
    ];

    fn row_values(row: &ForwardFlightRow) -> [f64; 29] {
        [
            row.airspeed_kt,
            row.dynamic_pressure_psf,
            row.advance_ratio,
            row.induced_velocity_ft_s,
            row.ct_over_sigma,
            row.stall_drag_increment,
            row.drag_divergence_mach,
            row.advancing_tip_mach,
            row.compressibility_drag_increment,
            row.profile_drag_coefficient,
            row.induced_hp,
            row.profile_hp,
            row.parasite_hp,
            row.main_rotor_hp,
            row.main_rotor_torque_ft_lb,
            row.antitorque_thrust_lb,
            row.fin_lift_lb,
            row.fin_induced_drag_lb,
            row.tail_rotor_thrust_lb,
            row.tail_rotor_induced_velocity_ft_s,
            row.tail_rotor_hp,
            row.shp_installed,
            row.shp_uninstalled,
            row.lift_to_drag,
            row.power_pct,
            row.sfc_lb_per_hp_hr,
            row.fuel_flow_lb_hr,
            row.specific_range_nm_per_lb,
            row.rate_of_climb_fpm,
        ]
    }

    /// Write the forward-flight table as CSV; per-row warnings are not exported.
    pub fn write_forward_flight<W: Write>(
        writer: W,
        table: &ForwardFlightTable,
    ) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(FORWARD_FLIGHT_COLUMNS)?;
        for row in &table.rows {
            csv.write_record(row_values(row).iter().map(|value| value.to_string()))?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_forward_flight_to_path(
        path: &Path,
        table: &ForwardFlightTable,
    ) -> Result<(), ExportError> {
        write_forward_flight(writer_for_path(path)?, table)
    }

    /// Write one CSV row per mission segment.
    pub fn write_mission<W: Write>(writer: W, report: &MissionReport) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(MISSION_COLUMNS)?;
        for segment in &report.segments {
            csv.write_record([
                segment.index.to_string(),
                segment.kind.to_string(),
                segment.fuel_burned_lb.to_string(),
                segment.fuel_remaining_lb.to_string(),
                segment.gross_weight_lb.to_string(),
                segment.distance_nm.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod json {
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// Pretty-print any serialisable record followed by a newline.
    pub fn write_json<W: Write, T: Serialize + ?Sized>(
        mut writer: W,
        value: &T,
    ) -> Result<(), ExportError> {
        to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_json_to_path<T: Serialize + ?Sized>(
        path: &Path,
        value: &T,
    ) -> Result<(), ExportError> {
        write_json(writer_for_path(path)?, value)
    }
}
