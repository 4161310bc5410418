//! Data model types for the reconciled track catalog.
//!
//! Cleaned source records are what the loaders hand to the builders. Table
//! rows are what gets emitted; their field order is the emitted column order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::NormalizedKey;

// ── Cleaned Sources ─────────────────────────────────────────────────────────

/// The nine continuous audio measurements carried by a catalog row.
///
/// Missing measurements are stored as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioMeasurements {
    pub tempo: f64,
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
}

/// A catalog row that survived cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub popularity: u32,
    pub duration_ms: u64,
    pub audio: AudioMeasurements,
    /// Genre label, `None` when the source left it blank.
    pub genre: Option<String>,
    pub normalized_track_name: NormalizedKey,
    pub normalized_artist_name: NormalizedKey,
}

/// A chart observation that survived cleaning, under canonical field names.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRecord {
    pub chart_date: NaiveDate,
    pub chart_rank: u32,
    pub song: String,
    pub artist: String,
    pub last_week: u32,
    pub peak_rank: u32,
    pub weeks_on_board: u32,
    pub normalized_song: NormalizedKey,
    pub normalized_artist: NormalizedKey,
}

// ── Dimensions ──────────────────────────────────────────────────────────────

/// An artist, keyed by exact display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub artist_id: u32,
    pub artist_name: String,
    pub normalized_artist_name: NormalizedKey,
}

/// A distinct genre label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub genre_id: u32,
    pub genre_name: String,
}

// ── Facts ───────────────────────────────────────────────────────────────────

/// A catalog track. `spotify_id` is the source identifier, never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub spotify_id: String,
    pub track_name: String,
    pub normalized_track_name: NormalizedKey,
    pub artist_id: u32,
    pub popularity: u32,
    pub duration_ms: u64,
    /// The catalog source has no explicit flag; always `false`.
    pub explicit: bool,
}

/// Audio measurements for one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub spotify_id: String,
    pub tempo: f64,
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
}

impl AudioFeatures {
    pub fn new(spotify_id: impl Into<String>, audio: &AudioMeasurements) -> Self {
        Self {
            spotify_id: spotify_id.into(),
            tempo: audio.tempo,
            danceability: audio.danceability,
            energy: audio.energy,
            loudness: audio.loudness,
            valence: audio.valence,
            acousticness: audio.acousticness,
            speechiness: audio.speechiness,
            instrumentalness: audio.instrumentalness,
            liveness: audio.liveness,
        }
    }
}

/// Link between a track and its genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackGenre {
    pub track_genre_id: u32,
    pub spotify_id: String,
    pub genre_id: u32,
}

/// One weekly chart position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub chart_id: u32,
    pub chart_date: NaiveDate,
    pub chart_rank: u32,
    pub song_title: String,
    pub artist_name: String,
    pub last_week: u32,
    pub peak_rank: u32,
    pub weeks_on_board: u32,
}

// ── Cross-Source Bridge ─────────────────────────────────────────────────────

/// A chart entry resolved to a catalog track through equal normalized keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartTrackLink {
    pub join_id: u32,
    pub spotify_id: String,
    pub chart_id: u32,
    pub clean_song_title: NormalizedKey,
    pub clean_artist_name: NormalizedKey,
}

// ── Table Set ───────────────────────────────────────────────────────────────

/// Every table produced by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub artists: Vec<Artist>,
    pub genres: Vec<Genre>,
    pub tracks: Vec<Track>,
    pub audio_features: Vec<AudioFeatures>,
    pub track_genres: Vec<TrackGenre>,
    pub chart_entries: Vec<ChartEntry>,
    pub chart_links: Vec<ChartTrackLink>,
}
