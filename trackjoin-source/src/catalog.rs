//! Track catalog loader.
//!
//! Reads the catalog export (one row per track with audio features and a
//! genre label) and cleans it into [`CatalogRecord`]s. Only `track_id`,
//! `track_name` and `artist_name` columns are required; any other missing
//! column behaves like an all-empty column.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use trackjoin_catalog::normalize::normalize_str;
use trackjoin_catalog::types::{AudioMeasurements, CatalogRecord};

use crate::coerce::{NotNumeric, count_field, measure_field, present};
use crate::error::{SourceError, SourceKind};

const REQUIRED_COLUMNS: &[&str] = &["track_id", "track_name", "artist_name"];

/// One catalog row exactly as it appears in the source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCatalogRow {
    pub track_id: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub popularity: Option<String>,
    pub duration_ms: Option<String>,
    pub tempo: Option<String>,
    pub danceability: Option<String>,
    pub energy: Option<String>,
    pub loudness: Option<String>,
    pub valence: Option<String>,
    pub acousticness: Option<String>,
    pub speechiness: Option<String>,
    pub instrumentalness: Option<String>,
    pub liveness: Option<String>,
    pub genre: Option<String>,
}

/// Row accounting for one catalog clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCleanStats {
    pub rows_read: u64,
    /// Records the CSV reader could not decode.
    pub malformed: u64,
    pub missing_required: u64,
    pub duplicate_ids: u64,
    pub invalid_numeric: u64,
    pub kept: u64,
}

impl CatalogCleanStats {
    pub fn dropped(&self) -> u64 {
        self.malformed + self.missing_required + self.duplicate_ids + self.invalid_numeric
    }
}

/// Cleaned catalog rows in source order, with their accounting.
#[derive(Debug, Clone, Default)]
pub struct CleanedCatalog {
    pub records: Vec<CatalogRecord>,
    pub stats: CatalogCleanStats,
}

/// Load and clean the catalog CSV at `path`.
pub fn load_catalog(path: &Path) -> Result<CleanedCatalog, SourceError> {
    let file =
        std::fs::File::open(path).map_err(|e| SourceError::io(SourceKind::Catalog, path, e))?;
    read_catalog(file)
}

/// Read and clean catalog CSV content.
///
/// Fails when the header is unreadable, a required column is absent, or no
/// row survives cleaning.
pub fn read_catalog<R: Read>(reader: R) -> Result<CleanedCatalog, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(|source| SourceError::Header {
        kind: SourceKind::Catalog,
        source,
    })?;
    check_columns(SourceKind::Catalog, headers, REQUIRED_COLUMNS)?;

    let mut rows = Vec::new();
    let mut malformed = 0u64;
    for result in reader.deserialize::<RawCatalogRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                log::warn!("Skipping malformed catalog row: {e}");
                malformed += 1;
            }
        }
    }

    let mut cleaned = clean_catalog(rows);
    cleaned.stats.rows_read += malformed;
    cleaned.stats.malformed = malformed;

    if cleaned.records.is_empty() {
        return Err(SourceError::Empty(SourceKind::Catalog));
    }
    Ok(cleaned)
}

/// Clean raw catalog rows.
///
/// Drops rows missing an identifier, title or artist, later duplicates of an
/// identifier, and rows with a non-numeric measurement. Survivors keep their
/// source order.
pub fn clean_catalog(rows: impl IntoIterator<Item = RawCatalogRow>) -> CleanedCatalog {
    let mut stats = CatalogCleanStats::default();
    let mut seen_ids = HashSet::new();
    let mut records = Vec::new();

    for row in rows {
        stats.rows_read += 1;

        let (Some(track_id), Some(track_name), Some(artist_name)) = (
            required(&row.track_id),
            required(&row.track_name),
            required(&row.artist_name),
        ) else {
            log::debug!(
                "Dropping catalog row {}: missing id, title or artist",
                stats.rows_read
            );
            stats.missing_required += 1;
            continue;
        };

        if !seen_ids.insert(track_id.to_string()) {
            log::debug!("Dropping duplicate catalog id {track_id}");
            stats.duplicate_ids += 1;
            continue;
        }

        let (popularity, duration_ms, audio) = match coerce_numbers(&row) {
            Ok(numbers) => numbers,
            Err(e) => {
                log::debug!("Dropping catalog row {track_id}: {e}");
                stats.invalid_numeric += 1;
                continue;
            }
        };

        records.push(CatalogRecord {
            track_id: track_id.to_string(),
            track_name: track_name.to_string(),
            artist_name: artist_name.to_string(),
            popularity,
            duration_ms,
            audio,
            genre: required(&row.genre).map(str::to_string),
            normalized_track_name: normalize_str(track_name),
            normalized_artist_name: normalize_str(artist_name),
        });
    }

    stats.kept = records.len() as u64;
    CleanedCatalog { records, stats }
}

/// The raw value of a required field, or `None` when it is blank.
///
/// Unlike [`present`] the returned text is not trimmed: display names keep
/// the source spelling.
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| present(Some(s)).is_some())
}

fn coerce_numbers(row: &RawCatalogRow) -> Result<(u32, u64, AudioMeasurements), NotNumeric> {
    let popularity = count_field("popularity", row.popularity.as_deref())?;
    let duration_ms = count_field("duration_ms", row.duration_ms.as_deref())?;
    let audio = AudioMeasurements {
        tempo: measure_field("tempo", row.tempo.as_deref())?,
        danceability: measure_field("danceability", row.danceability.as_deref())?,
        energy: measure_field("energy", row.energy.as_deref())?,
        loudness: measure_field("loudness", row.loudness.as_deref())?,
        valence: measure_field("valence", row.valence.as_deref())?,
        acousticness: measure_field("acousticness", row.acousticness.as_deref())?,
        speechiness: measure_field("speechiness", row.speechiness.as_deref())?,
        instrumentalness: measure_field("instrumentalness", row.instrumentalness.as_deref())?,
        liveness: measure_field("liveness", row.liveness.as_deref())?,
    };
    Ok((
        u32::try_from(popularity).unwrap_or(u32::MAX),
        duration_ms,
        audio,
    ))
}

/// Reject a header that lacks any of `required`.
pub(crate) fn check_columns(
    kind: SourceKind,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<(), SourceError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SourceError::MissingColumns {
            kind,
            columns: missing,
        })
    }
}
