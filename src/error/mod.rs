//! Error handling module for Freezecut

use thiserror::Error;

/// Main error type for Freezecut operations
#[derive(Error, Debug)]
pub enum FreezecutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Output path resolves to the input file
    #[error("Output would overwrite the input file: {path}")]
    OutputIsInput { path: String },

    /// Keep-region list cannot be used for a concat pass
    #[error("Invalid regions: {message}")]
    InvalidRegions { message: String },

    /// Freeze regions were not ascending and non-overlapping
    #[error(
        "Freeze region {index} starts at {start:.3}s, before the previous region ends at {previous_end:.3}s"
    )]
    UnorderedRegions {
        index: usize,
        start: f64,
        previous_end: f64,
    },

    /// External process exited with a non-zero status
    #[error("{program} failed:\n{output}")]
    ProcessFailure { program: String, output: String },

    /// External process could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreezecutError {
    /// Build an `InvalidRegions` error from any message
    pub fn invalid_regions(message: impl Into<String>) -> Self {
        Self::InvalidRegions {
            message: message.into(),
        }
    }

    /// Build a `Config` error from any message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for Freezecut operations
pub type FreezecutResult<T> = std::result::Result<T, FreezecutError>;
