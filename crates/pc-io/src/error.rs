//! Error types for pc-io.

use thiserror::Error;

use pc_core::CoreError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {row}: {source}")]
    InvalidRecord { row: usize, source: CoreError },
}

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;
