//! Headless host for the Pastorale scene simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pastorale",
    about = "Pastorale: a living village scene, simulated headless",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scene and print a summary
    Run {
        /// Number of ticks to simulate (default: 3600, about 36 in-world hours)
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Time-of-day units per tick (overrides the config file)
        #[arg(long)]
        speed: Option<f32>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the full occurrence log (not just notable entries)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the scene and print the final render snapshot as JSON
    Snapshot {
        /// Number of ticks to simulate before capturing
        #[arg(short, long, default_value = "1")]
        ticks: u64,

        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Indent the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the default configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            ticks,
            seed,
            speed,
            config,
            verbose,
        } => commands::run::run(config.as_deref(), ticks, seed, speed, verbose),
        Commands::Snapshot {
            ticks,
            seed,
            config,
            pretty,
        } => commands::snapshot::run(config.as_deref(), ticks, seed, pretty),
        Commands::Config { output } => commands::config::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
