//! Pipeline driver.
//!
//! Runs the stages in a fixed order: load and clean both sources, build
//! dimensions, build facts, reconcile charts against the catalog, verify,
//! emit. Nothing is written unless every earlier stage succeeded.

use std::path::{Path, PathBuf};

use serde::Serialize;
use trackjoin_catalog::types::{CatalogRecord, ChartRecord, Tables};
use trackjoin_source::{CatalogCleanStats, ChartCleanStats, load_catalog, load_charts};
use trackjoin_tables::emit_tables;

use crate::dimensions::{artist_key_collisions, build_artists, build_genres};
use crate::error::ImportError;
use crate::facts::{
    build_audio_features, build_chart_entries, build_track_genres, build_tracks,
    valid_track_ids,
};
use crate::progress::PipelineProgress;
use crate::reconcile::{ReconcileStats, TrackKeyIndex, link_charts};
use crate::verify::check_integrity;

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub catalog_path: PathBuf,
    pub charts_path: PathBuf,
    pub out_dir: PathBuf,
}

/// Row counts per emitted table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub artists: usize,
    pub genres: usize,
    pub tracks: usize,
    pub audio_features: usize,
    pub track_genres: usize,
    pub billboard_charts: usize,
    pub song_join: usize,
}

impl TableCounts {
    pub fn of(tables: &Tables) -> Self {
        Self {
            artists: tables.artists.len(),
            genres: tables.genres.len(),
            tracks: tables.tracks.len(),
            audio_features: tables.audio_features.len(),
            track_genres: tables.track_genres.len(),
            billboard_charts: tables.chart_entries.len(),
            song_join: tables.chart_links.len(),
        }
    }
}

/// Verified tables plus what the build learned along the way.
#[derive(Debug, Clone)]
pub struct BuiltTables {
    pub tables: Tables,
    pub reconcile: ReconcileStats,
    /// Artists sharing a normalized key with another artist.
    pub artist_key_collisions: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub out_dir: PathBuf,
    pub catalog: CatalogCleanStats,
    pub charts: ChartCleanStats,
    pub tables: TableCounts,
    pub reconcile: ReconcileStats,
    pub artist_key_collisions: usize,
}

/// Build and verify every table from cleaned records. No I/O.
pub fn build_tables(
    catalog: &[CatalogRecord],
    charts: &[ChartRecord],
    progress: Option<&dyn PipelineProgress>,
) -> Result<BuiltTables, ImportError> {
    let table_done = |name: &str, rows: usize| {
        if let Some(p) = progress {
            p.on_table(name, rows);
        }
    };

    if let Some(p) = progress {
        p.on_phase("Building dimensions");
    }
    let artists = build_artists(catalog);
    table_done("artists", artists.rows.len());
    let genres = build_genres(catalog);
    table_done("genres", genres.rows.len());

    let collisions = artist_key_collisions(&artists.rows);
    if collisions > 0 {
        log::warn!(
            "{} artist names share a normalized key with another artist; they remain separate artists",
            collisions
        );
    }

    if let Some(p) = progress {
        p.on_phase("Building facts");
    }
    let tracks = build_tracks(catalog, &artists)?;
    table_done("tracks", tracks.len());
    let valid_ids = valid_track_ids(&tracks);
    let audio_features = build_audio_features(catalog, &valid_ids);
    table_done("audio_features", audio_features.len());
    let track_genres = build_track_genres(catalog, &valid_ids, &genres)?;
    table_done("track_genres", track_genres.len());
    let chart_entries = build_chart_entries(charts);
    table_done("billboard_charts", chart_entries.len());

    if let Some(p) = progress {
        p.on_phase("Reconciling charts with catalog");
    }
    let index = TrackKeyIndex::build(&tracks, &artists.rows);
    let reconciled = link_charts(&index, charts);
    table_done("song_join", reconciled.links.len());
    log::debug!(
        "{} of {} chart rows matched, {} with several tracks",
        reconciled.stats.matched_rows,
        reconciled.stats.chart_rows,
        reconciled.stats.multi_match_rows
    );

    let tables = Tables {
        artists: artists.rows,
        genres: genres.rows,
        tracks,
        audio_features,
        track_genres,
        chart_entries,
        chart_links: reconciled.links,
    };

    if let Some(p) = progress {
        p.on_phase("Verifying integrity");
    }
    if let Err(e) = check_integrity(&tables) {
        log::error!("{e}");
        return Err(e.into());
    }

    Ok(BuiltTables {
        tables,
        reconcile: reconciled.stats,
        artist_key_collisions: collisions,
    })
}

/// Run the whole pipeline: load, build, verify, emit.
///
/// Both sources are loaded before anything is built, so a bad chart feed
/// fails the run just as early as a bad catalog.
pub fn run(
    options: &RunOptions,
    progress: Option<&dyn PipelineProgress>,
) -> Result<RunReport, ImportError> {
    if let Some(p) = progress {
        p.on_phase(&format!("Loading catalog {}", options.catalog_path.display()));
    }
    let catalog = load_catalog(&options.catalog_path)?;
    log::info!(
        "Catalog: kept {} of {} rows",
        catalog.stats.kept,
        catalog.stats.rows_read
    );

    if let Some(p) = progress {
        p.on_phase(&format!("Loading charts {}", options.charts_path.display()));
    }
    let charts = load_charts(&options.charts_path)?;
    log::info!(
        "Charts: kept {} of {} rows",
        charts.stats.kept,
        charts.stats.rows_read
    );

    let built = build_tables(&catalog.records, &charts.records, progress)?;

    if let Some(p) = progress {
        p.on_phase(&format!("Writing tables to {}", options.out_dir.display()));
    }
    emit(&options.out_dir, &built.tables)?;

    let report = RunReport {
        out_dir: options.out_dir.clone(),
        catalog: catalog.stats,
        charts: charts.stats,
        tables: TableCounts::of(&built.tables),
        reconcile: built.reconcile,
        artist_key_collisions: built.artist_key_collisions,
    };

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Wrote {} tracks and {} chart links",
            report.tables.tracks, report.tables.song_join
        ));
    }
    Ok(report)
}

fn emit(out_dir: &Path, tables: &Tables) -> Result<(), ImportError> {
    let summary = emit_tables(out_dir, tables)?;
    for table in &summary.tables {
        log::debug!("{}: {} rows -> {}", table.name, table.rows, table.path.display());
    }
    Ok(())
}
