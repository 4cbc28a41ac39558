//! Error types for grid construction and field engines.

use thiserror::Error;

/// Errors that can occur while building grids or moving field data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Dimension mismatch between an array and the grid it is bound to.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Resolution not usable with the requested convention.
    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    /// Requested engine is not compiled in or cannot serve the precision.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Data transfer between host arrays and the engine failed.
    #[error("Data transfer failed: {0}")]
    DataTransfer(String),
}

impl GridError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
