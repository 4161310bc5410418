use thiserror::Error;
use trackjoin_source::SourceError;
use trackjoin_tables::EmitError;

use crate::verify::IntegrityError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to emit tables: {0}")]
    Emit(#[from] EmitError),

    #[error("Track {track_id} references unknown artist {artist_name:?}")]
    MissingArtist {
        track_id: String,
        artist_name: String,
    },

    #[error("Track {track_id} references unknown genre {genre:?}")]
    MissingGenre { track_id: String, genre: String },

    #[error("Integrity check failed: {0}")]
    Integrity(#[from] IntegrityError),
}
