//! Weekly chart feed loader.
//!
//! The feed uses its own column names (`date`, `rank`, `last-week`,
//! `peak-rank`, `weeks-on-board`); cleaning maps them onto the canonical
//! [`ChartRecord`] fields. Rows whose date does not parse are dropped.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use trackjoin_catalog::normalize::normalize;
use trackjoin_catalog::types::ChartRecord;

use crate::catalog::check_columns;
use crate::coerce::{lenient_count, parse_chart_date};
use crate::error::{SourceError, SourceKind};

const REQUIRED_COLUMNS: &[&str] = &["date", "song", "artist"];

/// One chart row under the feed's own field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawChartRow {
    pub date: Option<String>,
    pub rank: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    #[serde(rename = "last-week")]
    pub last_week: Option<String>,
    #[serde(rename = "peak-rank")]
    pub peak_rank: Option<String>,
    #[serde(rename = "weeks-on-board")]
    pub weeks_on_board: Option<String>,
}

/// Row accounting for one chart clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartCleanStats {
    pub rows_read: u64,
    /// Records the CSV reader could not decode.
    pub malformed: u64,
    pub invalid_date: u64,
    pub kept: u64,
}

impl ChartCleanStats {
    pub fn dropped(&self) -> u64 {
        self.malformed + self.invalid_date
    }
}

/// Cleaned chart rows in source order, with their accounting.
#[derive(Debug, Clone, Default)]
pub struct CleanedCharts {
    pub records: Vec<ChartRecord>,
    pub stats: ChartCleanStats,
}

/// Load and clean the chart CSV at `path`.
pub fn load_charts(path: &Path) -> Result<CleanedCharts, SourceError> {
    let file =
        std::fs::File::open(path).map_err(|e| SourceError::io(SourceKind::Charts, path, e))?;
    read_charts(file)
}

/// Read and clean chart CSV content.
///
/// An empty result is allowed: the chart feed only feeds the bridge table.
pub fn read_charts<R: Read>(reader: R) -> Result<CleanedCharts, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(|source| SourceError::Header {
        kind: SourceKind::Charts,
        source,
    })?;
    check_columns(SourceKind::Charts, headers, REQUIRED_COLUMNS)?;

    let mut rows = Vec::new();
    let mut malformed = 0u64;
    for result in reader.deserialize::<RawChartRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                log::warn!("Skipping malformed chart row: {e}");
                malformed += 1;
            }
        }
    }

    let mut cleaned = clean_charts(rows);
    cleaned.stats.rows_read += malformed;
    cleaned.stats.malformed = malformed;

    if cleaned.records.is_empty() {
        log::warn!("Chart feed has no usable rows; no chart links will be produced");
    }
    Ok(cleaned)
}

/// Clean raw chart rows, keeping source order.
pub fn clean_charts(rows: impl IntoIterator<Item = RawChartRow>) -> CleanedCharts {
    let mut stats = ChartCleanStats::default();
    let mut records = Vec::new();

    for row in rows {
        stats.rows_read += 1;

        let Some(chart_date) = parse_chart_date(row.date.as_deref()) else {
            log::debug!(
                "Dropping chart row {}: unparseable date {:?}",
                stats.rows_read,
                row.date
            );
            stats.invalid_date += 1;
            continue;
        };

        records.push(ChartRecord {
            chart_date,
            chart_rank: lenient_count(row.rank.as_deref()),
            normalized_song: normalize(row.song.as_deref()),
            normalized_artist: normalize(row.artist.as_deref()),
            song: row.song.unwrap_or_default(),
            artist: row.artist.unwrap_or_default(),
            last_week: lenient_count(row.last_week.as_deref()),
            peak_rank: lenient_count(row.peak_rank.as_deref()),
            weeks_on_board: lenient_count(row.weeks_on_board.as_deref()),
        });
    }

    stats.kept = records.len() as u64;
    CleanedCharts { records, stats }
}
