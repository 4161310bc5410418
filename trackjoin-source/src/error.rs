use std::fmt;

/// Which input a [`SourceError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Catalog,
    Charts,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => f.write_str("catalog"),
            Self::Charts => f.write_str("chart feed"),
        }
    }
}

/// Errors that make a whole source unusable.
///
/// Row-level problems never surface here; they are counted in the clean stats.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error reading {kind} at {path}: {source}")]
    Io {
        kind: SourceKind,
        path: String,
        source: std::io::Error,
    },

    #[error("Unreadable {kind} header: {source}")]
    Header { kind: SourceKind, source: csv::Error },

    #[error("{kind} is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        kind: SourceKind,
        columns: Vec<String>,
    },

    #[error("{0} has no usable rows after cleaning")]
    Empty(SourceKind),
}

impl SourceError {
    pub fn io(kind: SourceKind, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            kind,
            path: path.display().to_string(),
            source,
        }
    }
}
