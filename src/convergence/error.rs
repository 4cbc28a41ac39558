//! Error types for convergence runs.

use thiserror::Error;

use crate::grid::GridError;
use crate::operators::OperatorError;

/// Errors that can occur while running or checking a convergence study.
#[derive(Error, Debug)]
pub enum ConvergenceError {
    /// Configuration rejected before any grid is built.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Grid construction, backend or data transfer failure.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Operator construction or application failure.
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Operator produced a different number of fields than test functions.
    #[error("Channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// Fitted slope is not a finite number.
    #[error("Degenerate fit for {function}: slope = {slope}")]
    DegenerateFit { function: String, slope: f64 },

    /// JSON (de)serialisation failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
