use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nearest-neighbor conditioning sets for Vecchia approximations.
#[derive(Parser)]
#[command(
    name = "vecchia",
    version,
    about = "Nearest-neighbor conditioning sets for Vecchia approximations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compare the approximate finder against brute force on synthetic points.
    Check(CheckArgs),
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file. Built-in defaults apply without one.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of neighbors from config.
    #[arg(short)]
    pub k: Option<usize>,

    /// Override the number of synthetic points from config.
    #[arg(short = 'n', long = "points")]
    pub n_points: Option<usize>,

    /// Override the coordinate dimension from config.
    #[arg(long)]
    pub dim: Option<usize>,

    /// Path for a JSON report.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
