//! Error types for the JSON, CLI and FFI surfaces.
//!
//! Pagination itself never fails; these cover input that could not be read
//! or decoded before the engine runs.

use std::io;
use thiserror::Error;

/// Result type alias for quiz-print operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input or output JSON could not be (de)serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Layout metrics the engine cannot work with.
    #[error("Invalid layout metrics: {0}")]
    InvalidMetrics(String),

    /// Input that is structurally unusable (not a job, not a record list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
