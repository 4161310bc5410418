//! Pre-emission integrity checks.
//!
//! Every primary key must be unique and every foreign key must resolve before
//! anything is written. A failure here means a builder bug, never bad input.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use thiserror::Error;
use trackjoin_catalog::types::Tables;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Duplicate {column} {key} in {table}")]
    DuplicateKey {
        table: &'static str,
        column: &'static str,
        key: String,
    },

    #[error("{table}.{column} {key} does not resolve to {target}")]
    DanglingReference {
        table: &'static str,
        column: &'static str,
        target: &'static str,
        key: String,
    },

    #[error("{table} has {rows} rows but tracks has {tracks}")]
    CountMismatch {
        table: &'static str,
        rows: usize,
        tracks: usize,
    },
}

/// Check keys, references and row counts across the whole table set.
pub fn check_integrity(tables: &Tables) -> Result<(), IntegrityError> {
    let artist_ids = unique_keys(
        "artists",
        "artist_id",
        tables.artists.iter().map(|a| a.artist_id),
    )?;
    let genre_ids = unique_keys(
        "genres",
        "genre_id",
        tables.genres.iter().map(|g| g.genre_id),
    )?;
    let track_ids = unique_keys(
        "tracks",
        "spotify_id",
        tables.tracks.iter().map(|t| t.spotify_id.as_str()),
    )?;
    let chart_ids = unique_keys(
        "billboard_charts",
        "chart_id",
        tables.chart_entries.iter().map(|c| c.chart_id),
    )?;
    unique_keys(
        "audio_features",
        "spotify_id",
        tables.audio_features.iter().map(|f| f.spotify_id.as_str()),
    )?;
    unique_keys(
        "track_genres",
        "track_genre_id",
        tables.track_genres.iter().map(|tg| tg.track_genre_id),
    )?;
    unique_keys(
        "song_join",
        "join_id",
        tables.chart_links.iter().map(|l| l.join_id),
    )?;

    resolves(
        ("tracks", "artist_id", "artists"),
        tables.tracks.iter().map(|t| t.artist_id),
        &artist_ids,
    )?;
    resolves(
        ("audio_features", "spotify_id", "tracks"),
        tables.audio_features.iter().map(|f| f.spotify_id.as_str()),
        &track_ids,
    )?;
    resolves(
        ("track_genres", "spotify_id", "tracks"),
        tables.track_genres.iter().map(|tg| tg.spotify_id.as_str()),
        &track_ids,
    )?;
    resolves(
        ("track_genres", "genre_id", "genres"),
        tables.track_genres.iter().map(|tg| tg.genre_id),
        &genre_ids,
    )?;
    resolves(
        ("song_join", "spotify_id", "tracks"),
        tables.chart_links.iter().map(|l| l.spotify_id.as_str()),
        &track_ids,
    )?;
    resolves(
        ("song_join", "chart_id", "billboard_charts"),
        tables.chart_links.iter().map(|l| l.chart_id),
        &chart_ids,
    )?;

    let tracks = tables.tracks.len();
    if tables.audio_features.len() != tracks {
        return Err(IntegrityError::CountMismatch {
            table: "audio_features",
            rows: tables.audio_features.len(),
            tracks,
        });
    }
    if tables.track_genres.len() > tracks {
        return Err(IntegrityError::CountMismatch {
            table: "track_genres",
            rows: tables.track_genres.len(),
            tracks,
        });
    }

    Ok(())
}

fn unique_keys<K: Eq + Hash + Display>(
    table: &'static str,
    column: &'static str,
    keys: impl Iterator<Item = K>,
) -> Result<HashSet<K>, IntegrityError> {
    let mut seen = HashSet::new();
    for key in keys {
        if seen.contains(&key) {
            return Err(IntegrityError::DuplicateKey {
                table,
                column,
                key: key.to_string(),
            });
        }
        seen.insert(key);
    }
    Ok(seen)
}

fn resolves<K: Eq + Hash + Display>(
    (table, column, target): (&'static str, &'static str, &'static str),
    keys: impl Iterator<Item = K>,
    known: &HashSet<K>,
) -> Result<(), IntegrityError> {
    for key in keys {
        if !known.contains(&key) {
            return Err(IntegrityError::DanglingReference {
                table,
                column,
                target,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackjoin_catalog::normalize::normalize_str;
    use trackjoin_catalog::types::*;

    fn tables() -> Tables {
        Tables {
            artists: vec![Artist {
                artist_id: 1,
                artist_name: "A".into(),
                normalized_artist_name: normalize_str("A"),
            }],
            genres: vec![Genre {
                genre_id: 1,
                genre_name: "Pop".into(),
            }],
            tracks: vec![Track {
                spotify_id: "T1".into(),
                track_name: "S".into(),
                normalized_track_name: normalize_str("S"),
                artist_id: 1,
                popularity: 0,
                duration_ms: 0,
                explicit: false,
            }],
            audio_features: vec![AudioFeatures::new("T1", &AudioMeasurements::default())],
            track_genres: vec![TrackGenre {
                track_genre_id: 1,
                spotify_id: "T1".into(),
                genre_id: 1,
            }],
            chart_entries: vec![],
            chart_links: vec![],
        }
    }

    #[test]
    fn test_consistent_tables_pass() {
        assert_eq!(check_integrity(&tables()), Ok(()));
        assert_eq!(check_integrity(&Tables::default()), Ok(()));
    }

    #[test]
    fn test_dangling_artist() {
        let mut t = tables();
        t.tracks[0].artist_id = 7;
        assert_eq!(
            check_integrity(&t),
            Err(IntegrityError::DanglingReference {
                table: "tracks",
                column: "artist_id",
                target: "artists",
                key: "7".into(),
            })
        );
    }

    #[test]
    fn test_dangling_chart_link() {
        let mut t = tables();
        t.chart_links.push(ChartTrackLink {
            join_id: 1,
            spotify_id: "T1".into(),
            chart_id: 3,
            clean_song_title: normalize_str("S"),
            clean_artist_name: normalize_str("A"),
        });
        assert!(matches!(
            check_integrity(&t),
            Err(IntegrityError::DanglingReference {
                column: "chart_id",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_track_id() {
        let mut t = tables();
        let dup = t.tracks[0].clone();
        t.tracks.push(dup);
        assert!(matches!(
            check_integrity(&t),
            Err(IntegrityError::DuplicateKey {
                table: "tracks",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_audio_features() {
        let mut t = tables();
        t.audio_features.clear();
        assert_eq!(
            check_integrity(&t),
            Err(IntegrityError::CountMismatch {
                table: "audio_features",
                rows: 0,
                tracks: 1,
            })
        );
    }
}
