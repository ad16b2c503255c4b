use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use nedgen::omnetpp::{load_options, to_omnetpp, NedOptions};
use nedgen::topology::{load_topology, Topology};

/// Export a network topology to an OMNeT++ NED script
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Topology file (.gml, .json, .yaml or .yml)
    #[arg(short, long)]
    input: PathBuf,

    /// Output NED file; the script is printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file with NED rendering options
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the topology's capacity unit (e.g. Mbps)
    #[arg(long)]
    capacity_unit: Option<String>,

    /// Override the topology's delay unit (e.g. ms)
    #[arg(long)]
    delay_unit: Option<String>,

    /// Override the topology name used for the NED network
    #[arg(long)]
    name: Option<String>,
}

impl Args {
    fn apply_overrides(&self, topology: &mut Topology) {
        if let Some(unit) = &self.capacity_unit {
            info!("Capacity unit override: {}", unit);
            topology.set_capacity_unit(unit.as_str());
        }
        if let Some(unit) = &self.delay_unit {
            info!("Delay unit override: {}", unit);
            topology.set_delay_unit(unit.as_str());
        }
        if let Some(name) = &self.name {
            topology.name = name.clone();
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr so stdout stays a clean NED script
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Topology file: {:?}", args.input);

    let options = match &args.options {
        Some(path) => load_options(path)
            .wrap_err_with(|| format!("Failed to load options '{}'", path.display()))?,
        None => NedOptions::default(),
    };

    let mut topology = load_topology(&args.input)
        .wrap_err_with(|| format!("Failed to load topology '{}'", args.input.display()))?;
    args.apply_overrides(&mut topology);

    let conversion = to_omnetpp(&topology, args.output.as_deref(), &options)
        .wrap_err("Failed to export NED script")?;

    if !conversion.advisories.is_empty() {
        info!(
            "Export finished with {} warning(s)",
            conversion.advisories.len()
        );
    }
    if let Some(output) = &args.output {
        info!("Ready to load in OMNeT++: {:?}", output);
    }
    Ok(())
}
