//! Output error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file could not be renamed onto the target.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding error.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The output name has no usable file name component.
    #[error("invalid output file name: {name}")]
    InvalidFileName { name: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
