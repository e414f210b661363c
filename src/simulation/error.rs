//! Errors raised at the edges of the simulation (files and configuration).

use thiserror::Error;

/// Failure while loading or saving simulation state or parameters.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A file did not contain valid JSON for the expected type.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Parameters are out of range or inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}
