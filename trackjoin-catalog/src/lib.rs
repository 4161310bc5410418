//! Track catalog data model types and text normalization.
//!
//! This crate defines the relational output schema (artists, tracks, audio
//! features, genres, chart entries and the bridge tables between them) plus
//! the cleaned source records the pipeline builds them from. It has no I/O;
//! `trackjoin-source` produces the cleaned records and `trackjoin-tables`
//! writes the tables.

pub mod normalize;
pub mod types;

pub use normalize::{NormalizedKey, normalize, normalize_str};
pub use types::*;
