//! Frame error types

use thiserror::Error;

/// Errors raised while building, merging, or exporting frames
#[derive(Debug, Error)]
pub enum FrameError {
    /// Row arity does not match the response headers
    #[error("malformed response row {row}: expected {expected} {section} values, got {got}")]
    RowShape {
        /// Zero-based row index
        row: usize,
        /// Header count for the section
        expected: usize,
        /// Values present in the row
        got: usize,
        /// "dimension" or "metric"
        section: &'static str,
    },

    /// A named column is absent from a frame
    #[error("column not found: '{0}'")]
    MissingColumn(String),

    /// I/O failure while exporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while exporting
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for frame operations
pub type Result<T> = std::result::Result<T, FrameError>;
