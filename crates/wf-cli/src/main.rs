//! CLI frontend for the Wayfarer travel and quest engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer — travel routes, quests, and sessions for narrative worlds",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic sample world and print it as JSON
    Sample {
        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the derived travel routes from a location
    Routes {
        /// Origin location id or name (case-insensitive)
        location: String,

        /// World file (JSON); default: the built-in sample world
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Only show routes within the origin's kingdom
        #[arg(short, long)]
        kingdom_only: bool,
    },

    /// Print renderable map segments from a location as JSON
    Paths {
        /// Origin location id or name (case-insensitive)
        location: String,

        /// World file (JSON); default: the built-in sample world
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Play an interactive travel session
    Play {
        /// World file (JSON); default: the built-in sample world
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Starting location id or name
        #[arg(short, long)]
        start: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sample { seed, out } => commands::sample::run(seed, out.as_deref()),
        Commands::Routes {
            location,
            world,
            kingdom_only,
        } => commands::routes::run(&location, world.as_deref(), kingdom_only),
        Commands::Paths { location, world } => {
            commands::paths::run(&location, world.as_deref())
        }
        Commands::Play { world, start } => commands::play::run(world.as_deref(), start.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
