mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::payback::{CrossoverArgs, DispatchArgs, PaybackCurveArgs};
use commands::repair::{RepairCostArgs, RepairCurveArgs};
use commands::sites::ProfileArgs;

/// Repair cost and revenue payback for failed PV strings
#[derive(Parser)]
#[command(
    name = "dchp",
    version,
    about = "Repair cost and revenue payback for failed PV strings",
    long_about = "Estimates what it costs to send a crew to repair failed DC strings at a \
                  PV plant and how long the recovered revenue takes to pay that cost back, \
                  depending on when the crew is dispatched."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a JSON or YAML configuration file (crew, plant, horizons, sites)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log more detail to stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sites and years in the catalog
    Sites,
    /// Show the monthly revenue profile of a site and year
    Profile(ProfileArgs),
    /// Estimate crew days and cost to repair failed strings
    RepairCost(RepairCostArgs),
    /// Repair cost for every string count up to a maximum
    RepairCurve(RepairCurveArgs),
    /// Payback against strings down for a fixed dispatch date
    PaybackCurve(PaybackCurveArgs),
    /// Cumulative recovered revenue against the repair cost
    Crossover(CrossoverArgs),
    /// Earliest dispatch date meeting a target payback
    Dispatch(DispatchArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::file::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    tracing::debug!(profiles = config.sites.len(), "configuration loaded");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sites => commands::sites::run_sites(&config),
        Commands::Profile(args) => commands::sites::run_profile(args, &config),
        Commands::RepairCost(args) => commands::repair::run_repair_cost(args, &config),
        Commands::RepairCurve(args) => commands::repair::run_repair_curve(args, &config),
        Commands::PaybackCurve(args) => commands::payback::run_payback_curve(args, &config),
        Commands::Crossover(args) => commands::payback::run_crossover(args, &config),
        Commands::Dispatch(args) => commands::payback::run_dispatch(args, &config),
        Commands::Version => {
            println!("dchp {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
