//! Fixed table layouts.
//!
//! Column lists here are the contract with the query layer that loads the
//! files. Each row type's field order must match its column list; the
//! `tests/schema.rs` suite checks that against the serialized header.

use serde::Serialize;
use trackjoin_catalog::types::*;

/// File name and column order of one emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

// ── Dimensions ──────────────────────────────────────────────────────────────

pub const ARTISTS: TableSpec = TableSpec {
    name: "artists",
    columns: &["artist_id", "artist_name", "normalized_artist_name"],
};

pub const GENRES: TableSpec = TableSpec {
    name: "genres",
    columns: &["genre_id", "genre_name"],
};

// ── Facts ───────────────────────────────────────────────────────────────────

pub const TRACKS: TableSpec = TableSpec {
    name: "tracks",
    columns: &[
        "spotify_id",
        "track_name",
        "normalized_track_name",
        "artist_id",
        "popularity",
        "duration_ms",
        "explicit",
    ],
};

pub const AUDIO_FEATURES: TableSpec = TableSpec {
    name: "audio_features",
    columns: &[
        "spotify_id",
        "tempo",
        "danceability",
        "energy",
        "loudness",
        "valence",
        "acousticness",
        "speechiness",
        "instrumentalness",
        "liveness",
    ],
};

pub const TRACK_GENRES: TableSpec = TableSpec {
    name: "track_genres",
    columns: &["track_genre_id", "spotify_id", "genre_id"],
};

pub const BILLBOARD_CHARTS: TableSpec = TableSpec {
    name: "billboard_charts",
    columns: &[
        "chart_id",
        "chart_date",
        "chart_rank",
        "song_title",
        "artist_name",
        "last_week",
        "peak_rank",
        "weeks_on_board",
    ],
};

pub const SONG_JOIN: TableSpec = TableSpec {
    name: "song_join",
    columns: &[
        "join_id",
        "spotify_id",
        "chart_id",
        "clean_song_title",
        "clean_artist_name",
    ],
};

// ── Application-owned placeholders ──────────────────────────────────────────

pub const USERS: TableSpec = TableSpec {
    name: "users",
    columns: &["user_id", "username", "email"],
};

pub const PLAYLISTS: TableSpec = TableSpec {
    name: "playlists",
    columns: &["playlist_id", "user_id", "name", "created_at"],
};

pub const PLAYLIST_TRACKS: TableSpec = TableSpec {
    name: "playlist_tracks",
    columns: &[
        "playlist_track_id",
        "playlist_id",
        "spotify_id",
        "position",
        "added_at",
    ],
};

/// Tables the pipeline never fills; emitted with a header row only.
pub const PLACEHOLDERS: &[TableSpec] = &[USERS, PLAYLISTS, PLAYLIST_TRACKS];

/// Every table, dimensions before the facts that reference them.
pub const EMIT_ORDER: &[TableSpec] = &[
    ARTISTS,
    GENRES,
    TRACKS,
    AUDIO_FEATURES,
    TRACK_GENRES,
    BILLBOARD_CHARTS,
    SONG_JOIN,
    USERS,
    PLAYLISTS,
    PLAYLIST_TRACKS,
];

/// A row type with a fixed table layout.
pub trait TableRow: Serialize {
    const SPEC: TableSpec;
}

impl TableRow for Artist {
    const SPEC: TableSpec = ARTISTS;
}

impl TableRow for Genre {
    const SPEC: TableSpec = GENRES;
}

impl TableRow for Track {
    const SPEC: TableSpec = TRACKS;
}

impl TableRow for AudioFeatures {
    const SPEC: TableSpec = AUDIO_FEATURES;
}

impl TableRow for TrackGenre {
    const SPEC: TableSpec = TRACK_GENRES;
}

impl TableRow for ChartEntry {
    const SPEC: TableSpec = BILLBOARD_CHARTS;
}

impl TableRow for ChartTrackLink {
    const SPEC: TableSpec = SONG_JOIN;
}
