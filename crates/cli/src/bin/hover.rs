use std::path::PathBuf;

use clap::Parser;
use rotor_cli::{VehicleArgs, ambient, init_logging};
use rotor_performance_calculator::export::json::write_json_to_path;
use rotor_performance_calculator::performance::{GroundEffect, HoverOptions};

#[derive(Parser)]
#[command(author, version, about = "Hover performance in or out of ground effect")]
struct Cli {
    #[command(flatten)]
    vehicle: VehicleArgs,

    /// Pressure altitude (ft)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    altitude: f64,

    /// Hover in ground effect instead of out of ground effect
    #[arg(long, default_value_t = false)]
    ige: bool,

    /// Vertical rate of climb (ft/min)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rate_of_climb: f64,

    /// Induced power factor
    #[arg(long = "k-i", default_value_t = 1.1)]
    k_i: f64,

    /// Also write the full record as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.vehicle.verbose);

    let helicopter = cli.vehicle.load_helicopter()?;
    let point = ambient(cli.altitude)?;
    let options = HoverOptions {
        ground_effect: if cli.ige {
            GroundEffect::InGroundEffect
        } else {
            GroundEffect::OutOfGroundEffect
        },
        rate_of_climb_fpm: cli.rate_of_climb,
        k_i: cli.k_i,
        ..HoverOptions::default()
    };
    let record = helicopter.hover(&point, &options)?;

    let mode = match record.ground_effect {
        GroundEffect::OutOfGroundEffect => "HOGE",
        GroundEffect::InGroundEffect => "HIGE",
    };
    println!(
        "{} {mode} @ {:.0} ft, GW {:.1} lb",
        helicopter.config().name,
        cli.altitude,
        record.gross_weight_lb
    );
    println!("  thrust coefficient: {:.6}", record.thrust_coefficient);
    println!("  tip loss factor:    {:.4}", record.tip_loss_factor);
    println!(
        "  main rotor:         {:.1} hp, {:.0} ft-lb",
        record.main_rotor_hp, record.main_rotor_torque_ft_lb
    );
    println!(
        "  tail rotor:         {:.1} hp, {:.1} lb thrust",
        record.tail_rotor_hp, record.tail_rotor_thrust_lb
    );
    println!("  SHP installed:      {:.1} hp", record.shp_installed);
    println!(
        "  SHP uninstalled:    {:.1} hp ({:.1}% rated)",
        record.shp_uninstalled, record.power_pct
    );
    println!("  sfc:                {:.4} lb/hp/hr", record.sfc_lb_per_hp_hr);
    println!("  fuel flow:          {:.1} lb/hr", record.fuel_flow_lb_hr);
    for warning in &record.warnings {
        println!("  warning: {warning}");
    }

    if let Some(path) = cli.json.as_deref() {
        write_json_to_path(path, &record)?;
    }
    Ok(())
}
