//! Dimension builders.
//!
//! Artists and genres get dense ids starting at 1, assigned in order of first
//! appearance in the cleaned catalog. The same input always yields the same
//! ids.

use std::collections::HashMap;

use indexmap::IndexMap;
use trackjoin_catalog::normalize::NormalizedKey;
use trackjoin_catalog::types::{Artist, CatalogRecord, Genre};

/// Dense 1-based ids keyed by exact text, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DenseIds {
    ids: IndexMap<String, u32>,
}

impl DenseIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of `key`, assigning the next one if it is new.
    pub fn assign(&mut self, key: &str) -> u32 {
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        let id = self.ids.len() as u32 + 1;
        self.ids.insert(key.to_string(), id);
        id
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.ids.get(key).copied()
    }
}

// ── Artists ─────────────────────────────────────────────────────────────────

/// Artist rows plus the display-name lookup used by the fact builders.
#[derive(Debug, Clone, Default)]
pub struct ArtistDimension {
    pub rows: Vec<Artist>,
    ids: DenseIds,
}

impl ArtistDimension {
    pub fn id_of(&self, artist_name: &str) -> Option<u32> {
        self.ids.get(artist_name)
    }
}

/// One artist per distinct display name.
///
/// Names that differ only in case or punctuation stay separate artists even
/// though they share a normalized key; see [`artist_key_collisions`].
pub fn build_artists(records: &[CatalogRecord]) -> ArtistDimension {
    let mut dim = ArtistDimension::default();
    for record in records {
        if dim.ids.get(&record.artist_name).is_some() {
            continue;
        }
        let artist_id = dim.ids.assign(&record.artist_name);
        dim.rows.push(Artist {
            artist_id,
            artist_name: record.artist_name.clone(),
            normalized_artist_name: record.normalized_artist_name.clone(),
        });
    }
    dim
}

/// Number of artists whose normalized key is shared with another artist.
pub fn artist_key_collisions(artists: &[Artist]) -> usize {
    let mut per_key: HashMap<&NormalizedKey, usize> = HashMap::new();
    for artist in artists {
        *per_key.entry(&artist.normalized_artist_name).or_default() += 1;
    }
    per_key.values().filter(|&&n| n > 1).sum()
}

// ── Genres ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct GenreDimension {
    pub rows: Vec<Genre>,
    ids: DenseIds,
}

impl GenreDimension {
    pub fn id_of(&self, genre_name: &str) -> Option<u32> {
        self.ids.get(genre_name)
    }
}

/// One genre per distinct non-missing label.
pub fn build_genres(records: &[CatalogRecord]) -> GenreDimension {
    let mut dim = GenreDimension::default();
    for label in records.iter().filter_map(|r| r.genre.as_deref()) {
        if dim.ids.get(label).is_some() {
            continue;
        }
        let genre_id = dim.ids.assign(label);
        dim.rows.push(Genre {
            genre_id,
            genre_name: label.to_string(),
        });
    }
    dim
}
