//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trackjoin")]
#[command(about = "Build a reconciled track catalog from catalog and chart CSVs", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input and output overrides for `build`.
#[derive(Args, Clone, Default)]
pub(crate) struct BuildArgs {
    /// Track catalog CSV (default: SpotifyFeatures.csv)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Weekly chart CSV (default: charts.csv)
    #[arg(long)]
    pub charts: Option<PathBuf>,

    /// Output directory for the emitted tables (default: cleaned_data)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Clean both sources, reconcile them, and write the tables
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Print the normalized join key of each argument
    Normalize {
        /// Titles or artist names to normalize
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective paths and where each value came from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the defaults (never overwrites)
    Init,
}
