use std::path::PathBuf;

use clap::Parser;
use rotor_cli::{VehicleArgs, ambient, init_logging};
use rotor_performance_calculator::export::table::write_forward_flight_to_path;
use rotor_performance_calculator::performance::{Airspeeds, ForwardFlightOptions};

#[derive(Parser)]
#[command(author, version, about = "Forward-flight speed sweep (speed-power polar)")]
struct Cli {
    #[command(flatten)]
    vehicle: VehicleArgs,

    /// Pressure altitude (ft)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    altitude: f64,

    /// First airspeed (kt)
    #[arg(long, default_value_t = 20.0)]
    from: f64,

    /// Last airspeed (kt)
    #[arg(long, default_value_t = 150.0)]
    to: f64,

    /// Number of airspeeds in the sweep
    #[arg(long, default_value_t = 27)]
    count: usize,

    /// Induced power factor
    #[arg(long = "k-i", default_value_t = 1.0)]
    k_i: f64,

    /// CSV output path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.vehicle.verbose);
    if cli.count == 0 {
        anyhow::bail!("--count must be at least 1");
    }

    let helicopter = cli.vehicle.load_helicopter()?;
    let point = ambient(cli.altitude)?;
    let table = helicopter.forward_flight(
        &point,
        Airspeeds::sweep(cli.from, cli.to, cli.count),
        &ForwardFlightOptions { k_i: cli.k_i },
    )?;

    if let Some(path) = cli.output.as_deref() {
        write_forward_flight_to_path(path, &table)?;
    }

    // Keep stdout clean when the CSV itself goes there.
    let to_stdout = cli.output.as_deref().is_some_and(|p| p.as_os_str() == "-");
    let report = |line: String| {
        if to_stdout {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };
    if let Some(row) = table.minimum_power() {
        report(format!(
            "minimum power: {:.1} kt at {:.1} hp",
            row.airspeed_kt, row.shp_uninstalled
        ));
    }
    if let Some(row) = table.best_range() {
        report(format!(
            "best range: {:.1} kt at {:.4} nm/lb",
            row.airspeed_kt, row.specific_range_nm_per_lb
        ));
    }
    if let Some(row) = table.max_rate_of_climb() {
        report(format!(
            "max rate of climb: {:.0} ft/min at {:.1} kt",
            row.rate_of_climb_fpm, row.airspeed_kt
        ));
    }
    Ok(())
}
