//! Error types for the pose metrics library.
//!
//! The per-frame pipeline itself never fails; these errors come from the
//! surrounding layers (configuration loading, landmark stream replay).

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Smoothing filter parameter error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A landmark stream line could not be decoded
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// 1-based line number in the stream
        line: usize,
        /// Decoder message
        message: String,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
