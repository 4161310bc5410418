use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::BuildArgs;
use crate::error::CliError;
use crate::settings::{ResolvedPaths, ValueSource, init_settings, load_settings, settings_path};

/// Show effective paths and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings(&path)?;
    let paths = ResolvedPaths::resolve(&BuildArgs::default(), &settings);

    log::info!(
        "{}",
        "trackjoin Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let status = if path.exists() { "(exists)" } else { "(not found)" };
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    let rows = [
        ("catalog", Some(&paths.catalog)),
        ("charts", Some(&paths.charts)),
        ("out", Some(&paths.out_dir)),
        ("report", paths.report.as_ref()),
    ];
    for (name, resolved) in rows {
        match resolved {
            Some(r) => {
                let source = format!("({})", r.source);
                log::info!(
                    "  {:<8} {} {}",
                    name,
                    r.value.display(),
                    if r.source == ValueSource::Default {
                        source.if_supports_color(Stdout, |t| t.dimmed()).to_string()
                    } else {
                        source.if_supports_color(Stdout, |t| t.green()).to_string()
                    },
                );
            }
            None => {
                log::info!(
                    "  {:<8} {}",
                    name,
                    "(not set)".if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

/// Print the settings file path to stdout, unaffected by `--quiet`.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Write a default settings file unless one exists.
pub(crate) fn run_config_init() -> Result<(), CliError> {
    let path = settings_path();
    if init_settings(&path)? {
        log::info!(
            "  {} Wrote {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display(),
        );
    } else {
        log::warn!(
            "  {} {} already exists; leaving it unchanged",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path.display(),
        );
    }
    Ok(())
}
