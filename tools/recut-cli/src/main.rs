//! Recut CLI — inspect, validate, and plan exports for project bundles.
//!
//! Usage:
//!   recut info <PATH>       Show project and recording information
//!   recut validate <PATH>   Validate a bundle and its timeline invariants
//!   recut edl <PATH>        Print per-track edit decision lists as JSON
//!   recut frames <PATH>     Replay the timeline headlessly and report stats

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recut_common::logging::init_logging;
use recut_common::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "recut",
    about = "Screen-recording post-production toolkit",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show project and recording information
    Info {
        /// Path to the project bundle directory
        path: PathBuf,
    },

    /// Validate a project bundle and its timeline invariants
    Validate {
        /// Path to the project bundle directory
        path: PathBuf,
    },

    /// Print the edit decision list the exporter would consume
    Edl {
        /// Path to the project bundle directory
        path: PathBuf,

        /// Which track to print: screen, camera, or both
        #[arg(long, default_value = "both")]
        track: String,
    },

    /// Replay the timeline headlessly and report frame statistics
    Frames {
        /// Path to the project bundle directory
        path: PathBuf,

        /// Frames per second for the replay (defaults to the recording fps)
        #[arg(long)]
        fps: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    init_logging(&logging);

    match cli.command {
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Edl { path, track } => commands::edl::run(path, &track),
        Commands::Frames { path, fps } => commands::frames::run(path, fps, &config),
    }
}
