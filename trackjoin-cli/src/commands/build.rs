use std::path::Path;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use trackjoin_import::{PipelineProgress, RunOptions, RunReport};

use crate::cli_types::BuildArgs;
use crate::error::CliError;
use crate::settings::{ResolvedPaths, load_settings, settings_path};

/// Run the full pipeline and print a summary.
pub(crate) fn run_build(args: BuildArgs, quiet: bool) -> Result<(), CliError> {
    let settings = load_settings(&settings_path())?;
    let paths = ResolvedPaths::resolve(&args, &settings);

    log::info!(
        "{}",
        format!(
            "Building tables from {} and {}",
            paths.catalog.value.display(),
            paths.charts.value.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let options = RunOptions {
        catalog_path: paths.catalog.value,
        charts_path: paths.charts.value,
        out_dir: paths.out_dir.value,
    };

    let progress = SpinnerProgress::new(quiet);
    let result = trackjoin_import::run(&options, Some(&progress));
    progress.finish();
    let report = result?;

    print_summary(&report);

    if let Some(report_path) = paths.report {
        write_report(&report_path.value, &report)?;
        log::info!(
            "  Report: {}",
            report_path
                .value
                .display()
                .if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    let counts = &report.tables;

    log::info!("");
    log::info!("{}", "Done!".if_supports_color(Stdout, |t| t.bold()));
    log::info!("Created {} artists", counts.artists);
    log::info!("Created {} tracks", counts.tracks);
    log::info!("Created {} audio features", counts.audio_features);
    log::info!("Created {} genres", counts.genres);
    log::info!("Created {} track-genre links", counts.track_genres);
    log::info!("Created {} billboard entries", counts.billboard_charts);
    log::info!("Created {} Spotify-Billboard matches", counts.song_join);

    let dropped = report.catalog.dropped() + report.charts.dropped();
    if dropped > 0 {
        log::info!(
            "  {} dropped {} catalog rows, {} chart rows",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            report.catalog.dropped(),
            report.charts.dropped(),
        );
    }
    log::info!(
        "  {} of {} chart rows matched a track",
        report.reconcile.matched_rows,
        report.reconcile.chart_rows,
    );
    if report.artist_key_collisions > 0 {
        log::info!(
            "  {} {} artist names collide on their normalized key",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            report.artist_key_collisions,
        );
    }
    log::info!(
        "  Output: {}",
        report.out_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(report).map_err(|e| CliError::report(e.to_string()))?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

/// Spinner showing the current pipeline phase.
struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl PipelineProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_table(&self, name: &str, rows: usize) {
        self.pb.suspend(|| {
            log::debug!(
                "  {} {}: {} rows",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                name,
                rows
            );
        });
    }

    fn on_complete(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }
}
