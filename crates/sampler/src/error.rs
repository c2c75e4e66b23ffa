use std::path::PathBuf;
use thiserror::Error;

/// Result type for sampling operations
pub type Result<T> = std::result::Result<T, SamplerError>;

/// Errors that can occur while sampling spans
#[derive(Error, Debug)]
pub enum SamplerError {
    /// Failed to read a source file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SamplerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
