use std::path::PathBuf;

use clap::Parser;
use rotor_cli::{VehicleArgs, init_logging};
use rotor_performance_calculator::atmosphere::StandardAtmosphere;
use rotor_performance_calculator::config::load_mission;
use rotor_performance_calculator::export::json::write_json_to_path;
use rotor_performance_calculator::export::table::write_mission;
use rotor_performance_calculator::export::writer_for_path;
use rotor_performance_calculator::performance::{
    MissionOptions, fly_mission, maneuvers_from_records,
};

#[derive(Parser)]
#[command(author, version, about = "Mission fuel-burn stepper")]
struct Cli {
    #[command(flatten)]
    vehicle: VehicleArgs,

    /// Mission profile (YAML list or TOML `[[maneuvers]]`)
    #[arg(long)]
    mission: PathBuf,

    /// Ground speed credited during MCP climbs (kt)
    #[arg(long, default_value_t = 120.0)]
    climb_credit_speed: f64,

    /// Write the mission report as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the per-segment table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.vehicle.verbose);

    let mut helicopter = cli.vehicle.load_helicopter()?;
    let maneuvers = maneuvers_from_records(&load_mission(&cli.mission)?)?;
    let options = MissionOptions {
        climb_credit_speed_kt: cli.climb_credit_speed,
        ..MissionOptions::default()
    };
    let report = fly_mission(&mut helicopter, &maneuvers, &StandardAtmosphere, &options)?;

    if let Some(path) = cli.csv.as_deref() {
        write_mission(writer_for_path(path)?, &report)?;
    }
    if let Some(path) = cli.json.as_deref() {
        write_json_to_path(path, &report)?;
        // JSON on stdout replaces the text report.
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-");
    println!("{:^45}", helicopter.config().name);
    println!("-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-");
    for segment in &report.segments {
        println!(
            "{:>2} {:<10} burned {:>8.2} lb  fuel {:>8.2} lb  GW {:>8.2} lb",
            segment.index,
            segment.kind.to_string(),
            segment.fuel_burned_lb,
            segment.fuel_remaining_lb,
            segment.gross_weight_lb
        );
        for warning in &segment.warnings {
            println!("   warning: {warning}");
        }
    }
    println!("Mission complete: {:.2} lb of fuel remaining", report.fuel_remaining_lb);
    println!("Total range: {:.2} nm", report.range_nm);
    Ok(())
}
