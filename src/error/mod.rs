//! Error handling for the pipeline scaffold.

use std::io;

/// Specialized error type for pipeline utilities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a base file nor a prefix was given to the latest-file resolver
    #[error("{0}")]
    MissingParameter(String),

    /// A required environment variable is unset or empty
    #[error("Environment variable '{0}' is required but not set.")]
    MissingEnvironmentVariable(String),

    /// An optional capability was compiled out
    #[error("{0}")]
    MissingDependency(String),

    /// A wrapped value is not of the expected type
    #[error("{0}")]
    InvalidInputType(String),

    /// Error reading the pipeline configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error opening or reading a file or directory
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[cfg(feature = "tables")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error processing Parquet data
    #[cfg(feature = "tables")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl Error {
    /// The error raised when `latest_file` gets neither a file nor a prefix
    #[must_use]
    pub fn missing_file_param() -> Self {
        Self::MissingParameter("Either file or prefix must be provided.".to_string())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
