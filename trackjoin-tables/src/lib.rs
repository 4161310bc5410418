//! CSV emission for the reconciled tables.
//!
//! Provides the fixed table layouts (file names and column order) and the
//! writer that emits a complete [`Tables`](trackjoin_catalog::Tables) set,
//! plus header-only placeholder tables owned by the application layer.

pub mod schema;
pub mod writer;

pub use schema::{EMIT_ORDER, PLACEHOLDERS, TableRow, TableSpec};
pub use writer::{
    EmitError, EmitSummary, EmittedTable, emit_tables, write_placeholder, write_table,
};
