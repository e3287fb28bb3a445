//! Error Types
//!
//! The smoothing path itself never fails; these cover the edges that take
//! external input (coordinate transforms and recorded traces).

use thiserror::Error;

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error types
#[derive(Error, Debug)]
pub enum Error {
    /// Scale must be finite and positive to be invertible
    #[error("Invalid stage scale: {0}")]
    InvalidScale(f64),

    /// Translation offset must be finite
    #[error("Invalid stage offset: ({0}, {1})")]
    InvalidOffset(f64, f64),

    /// Trace line could not be parsed as a sample
    #[error("Invalid trace line {line}: {source}")]
    TraceParse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
