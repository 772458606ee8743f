//! Console driver for Skirmish battles.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sk",
    about = "Skirmish: tactical battles with exploding dice",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fight a battle from a scenario file, reading commands from stdin
    Play {
        /// Scenario JSON file
        scenario: PathBuf,

        /// RNG seed (overrides the scenario's config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Keep combatants in scenario order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Print success odds for a die against target numbers 2 to 12
    Odds {
        /// Die expression, e.g. d8 or d6+1
        die: String,

        /// Include a wild die
        #[arg(short, long)]
        wild: bool,
    },

    /// Roll a die expression once
    Roll {
        /// Die expression, e.g. 2d6+1
        die: String,

        /// Roll a wild die alongside
        #[arg(short, long)]
        wild: bool,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            scenario,
            seed,
            no_shuffle,
        } => commands::play::run(&scenario, seed, no_shuffle),
        Commands::Odds { die, wild } => commands::odds::run(&die, wild),
        Commands::Roll { die, wild, seed } => commands::roll::run(&die, wild, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
