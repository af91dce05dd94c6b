//! Output error types
//!
//! The rendering core is total; only writing pages and exports can fail.

use thiserror::Error;

/// Errors raised while writing rendered output
#[derive(Error, Debug)]
pub enum RenderError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV writer failed
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        RenderError::Csv(err.to_string())
    }
}

impl<W> From<csv::IntoInnerError<W>> for RenderError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        RenderError::Csv(err.error().to_string())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
