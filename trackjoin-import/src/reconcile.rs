//! Chart-to-catalog reconciliation.
//!
//! A chart entry links to every catalog track whose normalized title and
//! normalized artist name both equal the entry's normalized song and artist.
//! This is a plain inner join: a chart row matching two tracks yields two
//! links, and a row matching nothing yields none.

use std::collections::HashMap;

use serde::Serialize;
use trackjoin_catalog::normalize::NormalizedKey;
use trackjoin_catalog::types::{Artist, ChartRecord, ChartTrackLink, Track};

use crate::facts::numbered_charts;

/// Statistics from a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub chart_rows: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub links: usize,
    /// Chart rows that linked to more than one track.
    pub multi_match_rows: usize,
}

pub struct ReconcileResult {
    pub links: Vec<ChartTrackLink>,
    pub stats: ReconcileStats,
}

/// Track ids grouped by (normalized title, normalized artist), in track order.
pub struct TrackKeyIndex<'a> {
    by_key: HashMap<(&'a NormalizedKey, &'a NormalizedKey), Vec<&'a str>>,
}

impl<'a> TrackKeyIndex<'a> {
    /// Index `tracks`, taking each track's artist key from `artists`.
    ///
    /// A track whose artist id is unknown is left out; integrity checks
    /// report it separately.
    pub fn build(tracks: &'a [Track], artists: &'a [Artist]) -> Self {
        let artist_keys: HashMap<u32, &NormalizedKey> = artists
            .iter()
            .map(|a| (a.artist_id, &a.normalized_artist_name))
            .collect();

        let mut by_key: HashMap<_, Vec<&str>> = HashMap::new();
        for track in tracks {
            let Some(&artist_key) = artist_keys.get(&track.artist_id) else {
                continue;
            };
            by_key
                .entry((&track.normalized_track_name, artist_key))
                .or_default()
                .push(track.spotify_id.as_str());
        }
        Self { by_key }
    }

    /// Track ids for a key pair; empty when nothing matches.
    pub fn lookup<'s>(
        &'s self,
        title: &'s NormalizedKey,
        artist: &'s NormalizedKey,
    ) -> &'s [&'s str] {
        self.by_key
            .get(&(title, artist))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Link every chart row to its matching tracks.
///
/// Chart ids follow the same numbering as the chart table. Join ids are
/// assigned from 1 in chart order, then track order within a chart row.
pub fn link_charts(index: &TrackKeyIndex<'_>, charts: &[ChartRecord]) -> ReconcileResult {
    let mut stats = ReconcileStats::default();
    let mut links = Vec::new();

    for (chart_id, chart) in numbered_charts(charts) {
        stats.chart_rows += 1;

        let matches = index.lookup(&chart.normalized_song, &chart.normalized_artist);
        match matches.len() {
            0 => {
                stats.unmatched_rows += 1;
                continue;
            }
            1 => stats.matched_rows += 1,
            n => {
                log::debug!(
                    "Chart row {} ({:?} by {:?}) matches {} tracks",
                    chart_id,
                    chart.song,
                    chart.artist,
                    n
                );
                stats.matched_rows += 1;
                stats.multi_match_rows += 1;
            }
        }

        for &spotify_id in matches {
            links.push(ChartTrackLink {
                join_id: links.len() as u32 + 1,
                spotify_id: spotify_id.to_string(),
                chart_id,
                clean_song_title: chart.normalized_song.clone(),
                clean_artist_name: chart.normalized_artist.clone(),
            });
        }
    }

    stats.links = links.len();
    ReconcileResult { links, stats }
}
