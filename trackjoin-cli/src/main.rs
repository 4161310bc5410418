//! trackjoin CLI
//!
//! Command-line interface for building the reconciled track catalog from a
//! track catalog export and a weekly chart feed.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli.command, cli.quiet) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Commands, quiet: bool) -> Result<(), CliError> {
    match command {
        Commands::Build { args } => commands::build::run_build(args, quiet),
        Commands::Normalize { text } => commands::normalize::run_normalize(&text),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Init => commands::config::run_config_init(),
        },
    }
}
