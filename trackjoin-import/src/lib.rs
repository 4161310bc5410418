//! Build the reconciled track tables from cleaned sources.
//!
//! This crate owns the ETL core: dense-id dimension builders, fact and bridge
//! builders, the cross-source chart reconciler, integrity verification, and
//! the pipeline driver that loads, builds, verifies and emits in that order.

pub mod dimensions;
pub mod error;
pub mod facts;
pub mod pipeline;
pub mod progress;
pub mod reconcile;
pub mod verify;

pub use dimensions::{
    ArtistDimension, DenseIds, GenreDimension, artist_key_collisions, build_artists,
    build_genres,
};
pub use error::ImportError;
pub use facts::{
    build_audio_features, build_chart_entries, build_track_genres, build_tracks,
    numbered_charts, valid_track_ids,
};
pub use pipeline::{BuiltTables, RunOptions, RunReport, TableCounts, build_tables, run};
pub use progress::{LogProgress, PipelineProgress, SilentProgress};
pub use reconcile::{ReconcileResult, ReconcileStats, TrackKeyIndex, link_charts};
pub use verify::{IntegrityError, check_integrity};
