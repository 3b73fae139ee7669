//! Error types for data dictionary inference.

use thiserror::Error;

/// Errors raised while profiling a table.
#[derive(Debug, Error)]
pub enum InferError {
    /// Failed DataFrame operation while computing column statistics.
    #[error("failed to profile column '{column}': {message}")]
    Column { column: String, message: String },

    /// Profiling was stopped by the caller between columns.
    #[error("profiling of table '{table}' cancelled after {completed} column(s)")]
    Cancelled { table: String, completed: usize },
}

impl InferError {
    pub(crate) fn column(column: &str, err: &polars::prelude::PolarsError) -> Self {
        Self::Column {
            column: column.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferError>;
