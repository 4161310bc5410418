//! Table emission.
//!
//! [`emit_tables`] writes the whole set into a staging directory inside the
//! output directory and only moves files into place once every table was
//! written. Replaced files are parked in a backup directory until the last
//! move succeeds; if any move fails the new files are taken out again and the
//! previous ones restored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use trackjoin_catalog::types::{
    Artist, AudioFeatures, ChartEntry, ChartTrackLink, Genre, Tables, Track, TrackGenre,
};

use crate::schema::{PLACEHOLDERS, TableRow, TableSpec};

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

impl EmitError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}

/// One emitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedTable {
    pub name: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

/// Files written by [`emit_tables`], in emission order.
#[derive(Debug, Clone, Default)]
pub struct EmitSummary {
    pub tables: Vec<EmittedTable>,
}

/// Write a table of rows to `dir`, returning the row count.
pub fn write_table<T: TableRow>(dir: &Path, rows: &[T]) -> Result<usize, EmitError> {
    write_rows(&dir.join(T::SPEC.file_name()), T::SPEC.columns, rows)
}

/// Write a header-only table to `dir`.
pub fn write_placeholder(dir: &Path, spec: &TableSpec) -> Result<(), EmitError> {
    write_rows::<()>(&dir.join(spec.file_name()), spec.columns, &[])?;
    Ok(())
}

fn write_rows<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<usize, EmitError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| EmitError::csv(path, e))?;

    wtr.write_record(columns).map_err(|e| EmitError::csv(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| EmitError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| EmitError::io(path, e))?;

    Ok(rows.len())
}

/// Emit every table plus the placeholders into `out_dir`.
///
/// Existing files with the same names are replaced. Either every table is
/// replaced or, on error, `out_dir` keeps the files it had before.
pub fn emit_tables(out_dir: &Path, tables: &Tables) -> Result<EmitSummary, EmitError> {
    fs::create_dir_all(out_dir).map_err(|e| EmitError::io(out_dir, e))?;

    let staging = tempfile::Builder::new()
        .prefix(".trackjoin-staging-")
        .tempdir_in(out_dir)
        .map_err(|e| EmitError::io(out_dir, e))?;
    let stage = staging.path();

    let mut staged: Vec<(&'static str, String, usize)> = Vec::new();
    let mut record =
        |spec: TableSpec, rows: usize| staged.push((spec.name, spec.file_name(), rows));

    record(Artist::SPEC, write_table(stage, &tables.artists)?);
    record(Genre::SPEC, write_table(stage, &tables.genres)?);
    record(Track::SPEC, write_table(stage, &tables.tracks)?);
    record(AudioFeatures::SPEC, write_table(stage, &tables.audio_features)?);
    record(TrackGenre::SPEC, write_table(stage, &tables.track_genres)?);
    record(ChartEntry::SPEC, write_table(stage, &tables.chart_entries)?);
    record(ChartTrackLink::SPEC, write_table(stage, &tables.chart_links)?);
    for spec in PLACEHOLDERS {
        write_placeholder(stage, spec)?;
        record(*spec, 0);
    }

    let file_names: Vec<&str> = staged.iter().map(|(_, f, _)| f.as_str()).collect();
    publish(stage, out_dir, &file_names)?;

    let mut summary = EmitSummary::default();
    for (name, file_name, rows) in staged {
        let target = out_dir.join(&file_name);
        log::debug!("Wrote {} ({} rows)", target.display(), rows);
        summary.tables.push(EmittedTable {
            name,
            path: target,
            rows,
        });
    }

    Ok(summary)
}

/// Files moved so far by [`publish`], for rolling back.
#[derive(Default)]
struct Moves<'a> {
    backed_up: Vec<&'a str>,
    placed: Vec<&'a str>,
}

/// Move staged files into `out_dir`, all or none.
fn publish(stage: &Path, out_dir: &Path, file_names: &[&str]) -> Result<(), EmitError> {
    // Kept on disk until the old files are either discarded or restored.
    let backup = tempfile::Builder::new()
        .prefix(".trackjoin-backup-")
        .keep(true)
        .tempdir_in(out_dir)
        .map_err(|e| EmitError::io(out_dir, e))?;
    let backup = backup.path().to_path_buf();

    let mut moves = Moves::default();
    let result = move_into_place(stage, out_dir, &backup, file_names, &mut moves);

    let restored = match &result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Rolling back {}: {}", out_dir.display(), e);
            roll_back(out_dir, &backup, &moves)
        }
    };

    if restored {
        if let Err(e) = fs::remove_dir_all(&backup) {
            log::warn!("Could not remove {}: {}", backup.display(), e);
        }
    } else {
        log::error!(
            "Previous tables could not all be restored; they remain in {}",
            backup.display()
        );
    }
    result
}

fn move_into_place<'a>(
    stage: &Path,
    out_dir: &Path,
    backup: &Path,
    file_names: &[&'a str],
    moves: &mut Moves<'a>,
) -> Result<(), EmitError> {
    for &file_name in file_names {
        let target = out_dir.join(file_name);
        if target.is_file() {
            fs::rename(&target, backup.join(file_name)).map_err(|e| EmitError::io(&target, e))?;
            moves.backed_up.push(file_name);
        }
    }
    for &file_name in file_names {
        let target = out_dir.join(file_name);
        fs::rename(stage.join(file_name), &target).map_err(|e| EmitError::io(&target, e))?;
        moves.placed.push(file_name);
    }
    Ok(())
}

/// Undo `moves`. Returns whether every previous file is back in `out_dir`.
fn roll_back(out_dir: &Path, backup: &Path, moves: &Moves<'_>) -> bool {
    for file_name in &moves.placed {
        let target = out_dir.join(file_name);
        if let Err(e) = fs::remove_file(&target) {
            log::warn!("Could not remove {}: {}", target.display(), e);
        }
    }

    let mut restored = true;
    for file_name in &moves.backed_up {
        let target = out_dir.join(file_name);
        if let Err(e) = fs::rename(backup.join(file_name), &target) {
            log::error!("Could not restore {}: {}", target.display(), e);
            restored = false;
        }
    }
    restored
}
