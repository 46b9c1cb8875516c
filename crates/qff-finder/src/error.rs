//! Error types for the finder crate.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while searching for a friend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FinderError {
    /// The name is not in the directory.
    #[error("Unknown friend: {0}")]
    UnknownFriend(String),

    /// An index outside the 10-bit search space.
    #[error("Index {0} is outside the search space 0..1024")]
    IndexOutOfRange(u32),

    /// A string that is not a 10-character binary index.
    #[error("Invalid bitstring '{0}': expected exactly 10 characters of '0' or '1'")]
    InvalidBitstring(String),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] qff_ir::IrError),

    /// Transpilation failed.
    #[error("Compilation error: {0}")]
    Compile(#[from] qff_compile::CompileError),

    /// The backend rejected or failed the job.
    #[error("Backend error: {0}")]
    Backend(#[from] qff_hal::HalError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Histogram encoding failed.
    #[error("Failed to encode histogram: {0}")]
    Plot(#[from] png::EncodingError),

    /// Nothing was measured, so there is nothing to plot or report.
    #[error("No measurement outcomes to report")]
    EmptyCounts,
}

/// Result type for finder operations.
pub type FinderResult<T> = Result<T, FinderError>;
