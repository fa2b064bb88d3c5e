use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the courier library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Unreachable destinations are not errors: the pathfinder reports them as
/// `None` and the route builder attaches them to the route as warnings.
#[derive(Debug, Error)]
pub enum Error {
    /// A record referenced a location that is not in the registry.
    #[error("unknown location '{id}' referenced by {context}")]
    UnknownLocation { id: String, context: String },

    /// Raised when two location records share the same identifier.
    #[error("duplicate location identifier: {id}")]
    DuplicateLocation { id: String },

    /// Raised when a location carries NaN or infinite coordinates.
    #[error("location '{id}' has non-finite coordinates")]
    InvalidCoordinates { id: String },

    /// Raised when an edge weight is negative or not a finite number.
    #[error("invalid weight {weight} on edge {origin} -> {destination}; weights must be finite and non-negative")]
    InvalidEdgeWeight {
        origin: String,
        destination: String,
        weight: f64,
    },

    /// Raised when the partitioner is asked for zero zones.
    #[error("cluster count must be at least 1 (got {requested})")]
    InvalidClusterCount { requested: usize },

    /// Dataset table could not be located at the resolved path.
    #[error("dataset file not found at {path}")]
    DatasetFileNotFound { path: PathBuf },

    /// Raised when a CSV table on disk could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Wrapper for CSV errors raised while reading in-memory tables.
    #[error(transparent)]
    CsvParse(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach the source file path to a CSV error raised by a reader-based loader.
    pub(crate) fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Error::CsvParse(source) => Error::Csv {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// Whether the error reports a broken reference between records.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Error::UnknownLocation { .. }
                | Error::DuplicateLocation { .. }
                | Error::InvalidCoordinates { .. }
                | Error::InvalidEdgeWeight { .. }
        )
    }
}
