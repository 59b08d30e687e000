mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

use commands::fmip::{FmipArgs, FmipCompareArgs, FmipSensitivityArgs};
use commands::lroma::{BreakevenArgs, LromaArgs, LromaSensitivityArgs};

/// Mobility asset returns and industrial-policy fiscal multipliers
#[derive(Parser)]
#[command(
    name = "isf",
    version,
    about = "Mobility asset returns and industrial-policy fiscal multipliers",
    long_about = "Computes the Levelized Return on Mobility Asset (LROMA) for a vehicle \
                  and the Fiscal Multiplier of Industrial Policy (FMIP) for named policy \
                  scenarios, with sensitivity sweeps and scenario comparison. Set RUST_LOG \
                  to control diagnostic output."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Levelized return per km for one vehicle
    Lroma(LromaArgs),
    /// One-at-a-time LROMA sensitivity sweep
    LromaSensitivity(LromaSensitivityArgs),
    /// Rough freight rate needed to reach a target LROMA
    Breakeven(BreakevenArgs),
    /// Fiscal multiplier for one scenario
    Fmip(FmipArgs),
    /// Fiscal multiplier across scenarios
    FmipCompare(FmipCompareArgs),
    /// FMIP sensitivity sweep on one scenario
    FmipSensitivity(FmipSensitivityArgs),
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("investor_state_core=warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Lroma(args) => commands::lroma::run_lroma(args),
        Commands::LromaSensitivity(args) => commands::lroma::run_sensitivity(args),
        Commands::Breakeven(args) => commands::lroma::run_breakeven(args),
        Commands::Fmip(args) => commands::fmip::run_fmip(args),
        Commands::FmipCompare(args) => commands::fmip::run_compare(args),
        Commands::FmipSensitivity(args) => commands::fmip::run_sensitivity(args),
        Commands::Version => {
            println!("isf {}", env!("CARGO_PKG_VERSION"));
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
