//! Fact and bridge table builders.

use std::collections::HashSet;

use trackjoin_catalog::types::{
    AudioFeatures, CatalogRecord, ChartEntry, ChartRecord, Track, TrackGenre,
};

use crate::dimensions::{ArtistDimension, GenreDimension};
use crate::error::ImportError;

/// One track per cleaned catalog row, in catalog order.
///
/// Every artist name must already be in `artists`; a miss means the
/// dimension was built from different records and aborts the run.
pub fn build_tracks(
    records: &[CatalogRecord],
    artists: &ArtistDimension,
) -> Result<Vec<Track>, ImportError> {
    records
        .iter()
        .map(|record| {
            let artist_id =
                artists
                    .id_of(&record.artist_name)
                    .ok_or_else(|| ImportError::MissingArtist {
                        track_id: record.track_id.clone(),
                        artist_name: record.artist_name.clone(),
                    })?;
            Ok(Track {
                spotify_id: record.track_id.clone(),
                track_name: record.track_name.clone(),
                normalized_track_name: record.normalized_track_name.clone(),
                artist_id,
                popularity: record.popularity,
                duration_ms: record.duration_ms,
                explicit: false,
            })
        })
        .collect()
}

/// Identifiers present in the track table.
pub fn valid_track_ids(tracks: &[Track]) -> HashSet<&str> {
    tracks.iter().map(|t| t.spotify_id.as_str()).collect()
}

/// Audio measurements for every record whose id made it into the track table.
pub fn build_audio_features(
    records: &[CatalogRecord],
    valid_ids: &HashSet<&str>,
) -> Vec<AudioFeatures> {
    records
        .iter()
        .filter(|r| valid_ids.contains(r.track_id.as_str()))
        .map(|r| AudioFeatures::new(r.track_id.as_str(), &r.audio))
        .collect()
}

/// Track-genre links for labelled records with a valid track id.
pub fn build_track_genres(
    records: &[CatalogRecord],
    valid_ids: &HashSet<&str>,
    genres: &GenreDimension,
) -> Result<Vec<TrackGenre>, ImportError> {
    records
        .iter()
        .filter(|r| valid_ids.contains(r.track_id.as_str()))
        .filter_map(|r| r.genre.as_deref().map(|genre| (r, genre)))
        .zip(1u32..)
        .map(|((record, genre), track_genre_id)| {
            let genre_id = genres
                .id_of(genre)
                .ok_or_else(|| ImportError::MissingGenre {
                    track_id: record.track_id.clone(),
                    genre: genre.to_string(),
                })?;
            Ok(TrackGenre {
                track_genre_id,
                spotify_id: record.track_id.clone(),
                genre_id,
            })
        })
        .collect()
}

/// Chart records paired with their chart ids.
///
/// Both the chart table and the reconciler number charts through here, so a
/// link's `chart_id` always names the entry it was matched from.
pub fn numbered_charts(records: &[ChartRecord]) -> impl Iterator<Item = (u32, &ChartRecord)> {
    (1u32..).zip(records.iter())
}

/// One chart entry per cleaned chart row, ids from 1 in feed order.
pub fn build_chart_entries(records: &[ChartRecord]) -> Vec<ChartEntry> {
    numbered_charts(records)
        .map(|(chart_id, r)| ChartEntry {
            chart_id,
            chart_date: r.chart_date,
            chart_rank: r.chart_rank,
            song_title: r.song.clone(),
            artist_name: r.artist.clone(),
            last_week: r.last_week,
            peak_rank: r.peak_rank,
            weeks_on_board: r.weeks_on_board,
        })
        .collect()
}
