//! CSV loaders and cleaners for the two input sources.
//!
//! The catalog loader reads the track/audio-feature export and the chart
//! loader reads the weekly chart feed. Both validate headers, coerce field
//! types, drop unusable rows (counting them), and attach normalized keys.

pub mod catalog;
pub mod chart;
pub mod coerce;
pub mod error;

pub use catalog::{
    CatalogCleanStats, CleanedCatalog, RawCatalogRow, clean_catalog, load_catalog, read_catalog,
};
pub use chart::{
    ChartCleanStats, CleanedCharts, RawChartRow, clean_charts, load_charts, read_charts,
};
pub use error::{SourceError, SourceKind};
