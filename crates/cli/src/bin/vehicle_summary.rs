use clap::Parser;
use rotor_cli::{VehicleArgs, init_logging};

#[derive(Parser)]
#[command(author, version, about = "Print the fixed-format vehicle summary")]
struct Cli {
    #[command(flatten)]
    vehicle: VehicleArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.vehicle.verbose);
    print!("{}", cli.vehicle.load_config()?);
    Ok(())
}
