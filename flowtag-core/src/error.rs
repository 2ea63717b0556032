use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a run. Per-row and per-line problems never end up here;
/// they are skipped with a diagnostic.
#[derive(Debug, Error)]
pub enum FlowtagError {
    //-------------------------------------------------------------------------
    // Inputs
    //-------------------------------------------------------------------------
    #[error("failed to read {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lookup table file {path} is empty or has no header row")]
    EmptyLookup { path: PathBuf },

    #[error("failed to read lookup table {path}: {source}")]
    Lookup {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    //-------------------------------------------------------------------------
    // Output
    //-------------------------------------------------------------------------
    #[error("failed to write report to {path}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Configuration
    //-------------------------------------------------------------------------
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FlowtagError {
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnavailable {
            path: path.into(),
            source,
        }
    }
}
