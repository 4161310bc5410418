use thiserror::Error;
use trackjoin_import::ImportError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file unreadable or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Pipeline failure
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Run report could not be written
    #[error("Report error: {0}")]
    Report(String),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
